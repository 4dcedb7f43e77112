//! Integration tests for banking-core

use banking_core::utils::MemoryRepository;
use banking_core::{Account, AccountId, AccountRepository, AccountService};
use bigdecimal::BigDecimal;
use std::time::Duration;
use uuid::Uuid;

async fn open_account(repository: &MemoryRepository) -> AccountId {
    let account = Account::new(Uuid::new_v4());
    let account_id = account.account_id();
    repository.save_account(&account).await.unwrap();
    account_id
}

#[tokio::test]
async fn test_full_banking_workflow() {
    let repository = MemoryRepository::new();
    let account_id = open_account(&repository).await;
    let service = AccountService::new(repository.clone());

    service
        .deposit(account_id, BigDecimal::from(500))
        .await
        .unwrap();
    service
        .withdraw(account_id, BigDecimal::from(120))
        .await
        .unwrap();
    service
        .deposit(account_id, BigDecimal::from(20))
        .await
        .unwrap();

    let account = repository
        .account_with_transactions(account_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(*account.balance(), BigDecimal::from(400));
    assert_eq!(account.transactions().len(), 3);

    let now = chrono::Utc::now().naive_utc();
    let balance_now = service.balance_at_date(account_id, now).await.unwrap();
    assert_eq!(balance_now, BigDecimal::from(400));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_deposits_on_one_account() {
    let repository = MemoryRepository::new();
    let account_id = open_account(&repository).await;
    let service = AccountService::new(repository.clone());

    let mut handles = Vec::new();
    for _ in 0..100 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .deposit(account_id, BigDecimal::from(10))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let account = repository
        .account_with_transactions(account_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(*account.balance(), BigDecimal::from(1000));
    assert_eq!(account.transactions().len(), 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_distinct_accounts_proceed_independently() {
    let repository = MemoryRepository::new();
    let first_id = open_account(&repository).await;
    let second_id = open_account(&repository).await;
    let service = AccountService::new(repository.clone());

    let mut handles = Vec::new();
    for _ in 0..50 {
        let service_first = service.clone();
        handles.push(tokio::spawn(async move {
            service_first
                .deposit(first_id, BigDecimal::from(10))
                .await
                .unwrap();
        }));
        let service_second = service.clone();
        handles.push(tokio::spawn(async move {
            service_second
                .deposit(second_id, BigDecimal::from(7))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let first = repository
        .account_with_transactions(first_id)
        .await
        .unwrap()
        .unwrap();
    let second = repository
        .account_with_transactions(second_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(*first.balance(), BigDecimal::from(500));
    assert_eq!(first.transactions().len(), 50);
    assert_eq!(*second.balance(), BigDecimal::from(350));
    assert_eq!(second.transactions().len(), 50);
}

#[tokio::test]
async fn test_balance_at_date_reconstructs_history() {
    let repository = MemoryRepository::new();
    let account_id = open_account(&repository).await;
    let service = AccountService::new(repository.clone());

    // Three deposits of 10, with a timestamp captured between each.
    let t0 = chrono::Utc::now().naive_utc();
    tokio::time::sleep(Duration::from_millis(20)).await;
    service
        .deposit(account_id, BigDecimal::from(10))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    let t1 = chrono::Utc::now().naive_utc();
    tokio::time::sleep(Duration::from_millis(20)).await;
    service
        .deposit(account_id, BigDecimal::from(10))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    let t2 = chrono::Utc::now().naive_utc();
    tokio::time::sleep(Duration::from_millis(20)).await;
    service
        .deposit(account_id, BigDecimal::from(10))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    let t3 = chrono::Utc::now().naive_utc();

    assert_eq!(
        service.balance_at_date(account_id, t0).await.unwrap(),
        BigDecimal::from(0)
    );
    assert_eq!(
        service.balance_at_date(account_id, t1).await.unwrap(),
        BigDecimal::from(10)
    );
    assert_eq!(
        service.balance_at_date(account_id, t2).await.unwrap(),
        BigDecimal::from(20)
    );
    assert_eq!(
        service.balance_at_date(account_id, t3).await.unwrap(),
        BigDecimal::from(30)
    );
}

#[tokio::test]
async fn test_query_at_exact_transaction_timestamp_excludes_it() {
    let repository = MemoryRepository::new();
    let account_id = open_account(&repository).await;
    let service = AccountService::new(repository.clone());

    service
        .deposit(account_id, BigDecimal::from(10))
        .await
        .unwrap();

    let account = repository
        .account_with_transactions(account_id)
        .await
        .unwrap()
        .unwrap();
    let stamp = account.transactions()[0].created_at();

    // A transaction stamped exactly at the queried instant counts as not
    // yet applied.
    let balance = service.balance_at_date(account_id, stamp).await.unwrap();
    assert_eq!(balance, BigDecimal::from(0));
}
