// T062: Integration test for parent totals reconciliation
//
// After every accepted item write the parent document's totals are rebuilt
// from the backend's authoritative item list and written back as a partial
// update. A failure there is non-fatal: the item save stands, the session
// only flags the totals as stale until a later write reconciles them.

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::*;
use rust_decimal_macros::dec;
use salebook::documents::DocumentKind;
use salebook::modules::editing::services::{DocumentSession, TotalsReconciler};
use uuid::Uuid;

#[tokio::test]
async fn test_item_save_reconciles_parent_totals() {
    init_tracing();
    let erp = spawn_mock_erp().await;
    let document_id = erp.seed_document(TestDataFactory::draft_document());

    let mut session = DocumentSession::open(
        erp.backend(),
        &fast_editing_config(),
        DocumentKind::Sale,
        document_id,
    )
    .await
    .unwrap();

    session.new_item().unwrap();
    session.set_product(Some(Uuid::new_v4())).unwrap();
    session.set_quantity(Some(dec!(2))).unwrap();
    session.set_unit_price(Some(dec!(25.00))).unwrap();
    session.save_draft().await.unwrap();

    // The session holds the canonical parent, token and all
    assert_eq!(session.document().total_products, dec!(50.00));
    assert_eq!(session.document().total_services, dec!(0));
    assert_eq!(session.document().total_document, dec!(50.00));
    assert_eq!(session.document().version, Some(1));
    assert!(!session.totals_stale());

    // And the server agrees
    let stored = erp.document(document_id);
    assert_eq!(stored.total_products, dec!(50.00));
    assert_eq!(stored.total_document, dec!(50.00));
    assert_eq!(erp.totals_requests(), 1);
}

/// The totals come from the backend's item list, so items saved by anyone
/// else count too.
#[tokio::test]
async fn test_totals_follow_the_authoritative_item_list() {
    init_tracing();
    let erp = spawn_mock_erp().await;
    let document_id = erp.seed_document(TestDataFactory::draft_document());
    erp.seed_item(TestDataFactory::product_item(
        document_id,
        1,
        dec!(1),
        dec!(100.00),
    ));

    let mut session = DocumentSession::open(
        erp.backend(),
        &fast_editing_config(),
        DocumentKind::Sale,
        document_id,
    )
    .await
    .unwrap();

    session.new_item().unwrap();
    session.set_service(Some(Uuid::new_v4())).unwrap();
    session.set_quantity(Some(dec!(1))).unwrap();
    session.set_unit_price(Some(dec!(50.00))).unwrap();
    session.save_draft().await.unwrap();

    assert_eq!(session.document().total_products, dec!(100.00));
    assert_eq!(session.document().total_services, dec!(50.00));
    assert_eq!(session.document().total_document, dec!(150.00));
}

#[tokio::test]
async fn test_totals_failure_is_non_fatal_and_marks_stale() {
    init_tracing();
    let erp = spawn_mock_erp().await;
    let document_id = erp.seed_document(TestDataFactory::draft_document());

    let mut session = DocumentSession::open(
        erp.backend(),
        &fast_editing_config(),
        DocumentKind::Sale,
        document_id,
    )
    .await
    .unwrap();

    erp.fail_totals_writes(1);

    session.new_item().unwrap();
    session.set_product(Some(Uuid::new_v4())).unwrap();
    session.set_quantity(Some(dec!(2))).unwrap();
    session.set_unit_price(Some(dec!(25.00))).unwrap();

    // The item save itself succeeds
    let saved = session.save_draft().await.unwrap();
    assert!(saved.id.is_some());
    assert_eq!(erp.items_for(document_id).len(), 1);

    // But the parent is flagged stale and keeps its old totals
    assert!(session.totals_stale());
    assert_eq!(session.document().total_products, dec!(0));
    assert_eq!(erp.document(document_id).total_products, dec!(0));

    // The next successful write reconciles everything
    session.new_item().unwrap();
    session.set_service(Some(Uuid::new_v4())).unwrap();
    session.set_quantity(Some(dec!(1))).unwrap();
    session.set_unit_price(Some(dec!(50.00))).unwrap();
    session.save_draft().await.unwrap();

    assert!(!session.totals_stale());
    assert_eq!(session.document().total_products, dec!(50.00));
    assert_eq!(session.document().total_services, dec!(50.00));
    assert_eq!(session.document().total_document, dec!(100.00));
}

#[tokio::test]
async fn test_delete_reconciles_totals_and_compacts_local_sequence() {
    init_tracing();
    let erp = spawn_mock_erp().await;
    let document_id = erp.seed_document(TestDataFactory::draft_document());
    let first = erp.seed_item(TestDataFactory::product_item(
        document_id,
        1,
        dec!(1),
        dec!(10.00),
    ));
    let second = erp.seed_item(TestDataFactory::product_item(
        document_id,
        2,
        dec!(1),
        dec!(20.00),
    ));

    let mut session = DocumentSession::open(
        erp.backend(),
        &fast_editing_config(),
        DocumentKind::Sale,
        document_id,
    )
    .await
    .unwrap();

    session.delete_item(first).await.unwrap();

    assert_eq!(session.items().len(), 1);
    assert_eq!(session.items()[0].id, Some(second));
    // Display ordinals compact locally; the server keeps its own
    assert_eq!(session.items()[0].item_seq, 1);
    assert_eq!(erp.items_for(document_id)[0].item_seq, 2);

    assert_eq!(session.document().total_products, dec!(20.00));
    assert_eq!(session.document().total_document, dec!(20.00));
    assert_eq!(erp.document(document_id).total_document, dec!(20.00));
}

/// Both list response shapes feed the same reconciliation.
#[tokio::test]
async fn test_paged_item_lists_reconcile_the_same() {
    init_tracing();
    let erp = spawn_mock_erp().await;
    erp.set_paged_lists(true);

    let document_id = erp.seed_document(TestDataFactory::draft_document());
    erp.seed_item(TestDataFactory::product_item(
        document_id,
        1,
        dec!(1),
        dec!(30.00),
    ));
    let second = erp.seed_item(TestDataFactory::service_item(
        document_id,
        2,
        dec!(1),
        dec!(45.00),
    ));

    let mut session = DocumentSession::open(
        erp.backend(),
        &fast_editing_config(),
        DocumentKind::Sale,
        document_id,
    )
    .await
    .unwrap();
    assert_eq!(session.items().len(), 2);

    session.edit_item(second).unwrap();
    session.set_unit_price(Some(dec!(50.00))).unwrap();
    session.save_draft().await.unwrap();

    assert_eq!(session.document().total_products, dec!(30.00));
    assert_eq!(session.document().total_services, dec!(50.00));
    assert_eq!(session.document().total_document, dec!(80.00));
}

/// The reconciler hands back the canonical parent so the caller's version
/// token stays fresh.
#[tokio::test]
async fn test_reconciler_returns_the_canonical_parent() {
    init_tracing();
    let erp = spawn_mock_erp().await;
    let document_id = erp.seed_document(TestDataFactory::draft_document());
    erp.seed_item(TestDataFactory::product_item(
        document_id,
        1,
        dec!(3),
        dec!(10.00),
    ));

    let reconciler = TotalsReconciler::new(erp.backend(), DocumentKind::Sale);
    let document = reconciler.reconcile(document_id).await.unwrap();

    assert_eq!(document.id, Some(document_id));
    assert_eq!(document.total_products, dec!(30.00));
    assert_eq!(document.total_document, dec!(30.00));
    assert_eq!(document.version, Some(1));
    assert_eq!(erp.document(document_id).total_products, dec!(30.00));
}
