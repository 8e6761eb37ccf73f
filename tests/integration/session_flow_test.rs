// T064: Integration test for the complete editing workflow
//
// Drives a session the way a document form would: create the document, add
// and rework items through the draft protocol, and verify the derived
// totals at every step, locally and on the server.

#[path = "../helpers/mod.rs"]
mod helpers;

use anyhow::Result;
use helpers::*;
use rust_decimal_macros::dec;
use salebook::documents::{DocumentKind, DocumentStatus};
use salebook::items::UnitType;
use salebook::modules::editing::services::{DocumentSession, EditState};
use uuid::Uuid;

#[tokio::test]
async fn test_full_editing_workflow() -> Result<()> {
    init_tracing();
    let erp = spawn_mock_erp().await;

    let mut session =
        DocumentSession::start(erp.backend(), &fast_editing_config(), DocumentKind::Sale);
    assert_eq!(session.state(), EditState::Browsing);

    // The document must exist before items can reference it
    session.save_document().await?;
    let document_id = session.document().id.expect("server assigns an id");

    // First item: a product
    session.new_item()?;
    session.set_product(Some(Uuid::new_v4()))?;
    session.set_description(Some("Standing desk".into()))?;
    session.set_unit_type(Some(UnitType::Unit))?;
    session.set_quantity(Some(dec!(2)))?;
    session.set_unit_price(Some(dec!(450.00)))?;
    session.set_discount_percentage(Some(dec!(10)))?;
    session.save_draft().await?;

    // Second item: a service
    session.new_item()?;
    session.set_service(Some(Uuid::new_v4()))?;
    session.set_description(Some("Assembly".into()))?;
    session.set_quantity(Some(dec!(3)))?;
    session.set_unit_price(Some(dec!(40.00)))?;
    session.save_draft().await?;

    // 2 × 450.00 at 10% = 810.00, plus 3 × 40.00 = 120.00
    assert_eq!(session.items().len(), 2);
    assert_eq!(session.document().total_products, dec!(810.00));
    assert_eq!(session.document().total_services, dec!(120.00));
    assert_eq!(session.document().total_document, dec!(930.00));
    assert!(!session.totals_stale());

    // Rework the service
    let service_id = session.items()[1].id.expect("persisted");
    session.edit_item(service_id)?;
    session.set_quantity(Some(dec!(5)))?;
    session.save_draft().await?;

    assert_eq!(session.document().total_services, dec!(200.00));
    assert_eq!(session.document().total_document, dec!(1010.00));

    // Save the header; the totals ride along
    session.save_document().await?;
    assert_eq!(session.state(), EditState::Browsing);

    let stored = erp.document(document_id);
    assert_eq!(stored.total_products, dec!(810.00));
    assert_eq!(stored.total_services, dec!(200.00));
    assert_eq!(stored.total_document, dec!(1010.00));
    Ok(())
}

#[tokio::test]
async fn test_numeric_setters_recompute_the_draft_synchronously() -> Result<()> {
    init_tracing();
    let erp = spawn_mock_erp().await;
    let document_id = erp.seed_document(TestDataFactory::draft_document());

    let mut session = DocumentSession::open(
        erp.backend(),
        &fast_editing_config(),
        DocumentKind::Sale,
        document_id,
    )
    .await?;

    session.new_item()?;
    session.set_product(Some(Uuid::new_v4()))?;

    session.set_quantity(Some(dec!(3)))?;
    assert_eq!(session.draft().unwrap().total_value, dec!(0));

    session.set_unit_price(Some(dec!(10.00)))?;
    assert_eq!(session.draft().unwrap().total_value, dec!(30.00));

    session.set_discount_percentage(Some(dec!(10)))?;
    assert_eq!(session.draft().unwrap().discount_value, dec!(3.00));
    assert_eq!(session.draft().unwrap().total_value, dec!(27.00));

    // Descriptive setters leave the derived fields alone
    session.set_description(Some("Chair".into()))?;
    session.set_observation(Some("White".into()))?;
    assert_eq!(session.draft().unwrap().total_value, dec!(27.00));

    // Nothing was sent anywhere
    assert!(erp.items_for(document_id).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cancel_edit_discards_the_draft() -> Result<()> {
    init_tracing();
    let erp = spawn_mock_erp().await;
    let document_id = erp.seed_document(TestDataFactory::draft_document());
    let item_id = erp.seed_item(TestDataFactory::product_item(
        document_id,
        1,
        dec!(1),
        dec!(10.00),
    ));

    let mut session = DocumentSession::open(
        erp.backend(),
        &fast_editing_config(),
        DocumentKind::Sale,
        document_id,
    )
    .await?;

    session.edit_item(item_id)?;
    session.set_quantity(Some(dec!(99)))?;
    session.cancel_edit();

    assert_eq!(session.state(), EditState::Browsing);
    assert!(session.draft().is_none());
    assert_eq!(session.items()[0].total_value, dec!(10.00));
    assert_eq!(erp.items_for(document_id)[0].total_value, dec!(10.00));
    Ok(())
}

#[tokio::test]
async fn test_only_one_draft_at_a_time() -> Result<()> {
    init_tracing();
    let erp = spawn_mock_erp().await;
    let document_id = erp.seed_document(TestDataFactory::draft_document());
    let item_id = erp.seed_item(TestDataFactory::product_item(
        document_id,
        1,
        dec!(1),
        dec!(10.00),
    ));

    let mut session = DocumentSession::open(
        erp.backend(),
        &fast_editing_config(),
        DocumentKind::Sale,
        document_id,
    )
    .await?;

    session.new_item()?;
    assert!(session.new_item().is_err());
    assert!(session.edit_item(item_id).is_err());

    session.cancel_edit();
    assert!(session.edit_item(item_id).is_ok());
    Ok(())
}

#[tokio::test]
async fn test_sequence_numbers_assign_and_compact() -> Result<()> {
    init_tracing();
    let erp = spawn_mock_erp().await;
    let document_id = erp.seed_document(TestDataFactory::draft_document());

    let mut session = DocumentSession::open(
        erp.backend(),
        &fast_editing_config(),
        DocumentKind::Order,
        document_id,
    )
    .await?;

    for price in [dec!(10.00), dec!(20.00), dec!(30.00)] {
        session.new_item()?;
        session.set_product(Some(Uuid::new_v4()))?;
        session.set_quantity(Some(dec!(1)))?;
        session.set_unit_price(Some(price))?;
        session.save_draft().await?;
    }

    let sequences: Vec<u32> = session.items().iter().map(|item| item.item_seq).collect();
    assert_eq!(sequences, vec![1, 2, 3]);

    let middle = session.items()[1].id.expect("persisted");
    session.delete_item(middle).await?;

    let sequences: Vec<u32> = session.items().iter().map(|item| item.item_seq).collect();
    assert_eq!(sequences, vec![1, 2]);
    assert_eq!(session.items()[1].total_value, dec!(30.00));
    assert_eq!(session.document().total_document, dec!(40.00));
    Ok(())
}

#[tokio::test]
async fn test_cancelled_document_accepts_no_edits() {
    init_tracing();
    let erp = spawn_mock_erp().await;
    let document_id = erp.seed_document(TestDataFactory::cancelled_document());

    let mut session = DocumentSession::open(
        erp.backend(),
        &fast_editing_config(),
        DocumentKind::Sale,
        document_id,
    )
    .await
    .unwrap();

    assert_eq!(session.document().status, DocumentStatus::Cancelled);
    assert!(session.new_item().is_err());
    assert!(session.save_document().await.is_err());
}

#[tokio::test]
async fn test_open_missing_document_fails() {
    init_tracing();
    let erp = spawn_mock_erp().await;

    let result = DocumentSession::open(
        erp.backend(),
        &fast_editing_config(),
        DocumentKind::Sale,
        Uuid::new_v4(),
    )
    .await;

    assert!(result.is_err());
}
