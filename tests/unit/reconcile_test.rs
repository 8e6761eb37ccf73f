// T054: Unit tests for canonical-response merging
//
// After every save the server's representation is folded back into the
// local list: replace the entry with the same id, append when none matches.
// Identity is the id alone; sequence numbers never participate.

use rust_decimal_macros::dec;
use salebook::documents::Document;
use salebook::items::LineItem;
use salebook::modules::editing::services::reconcile_by_id;
use uuid::Uuid;

fn stored_item(document_id: Uuid, item_seq: u32) -> LineItem {
    let mut item = LineItem::new(document_id, item_seq);
    item.id = Some(Uuid::new_v4());
    item.set_product(Some(Uuid::new_v4()));
    item.quantity = Some(dec!(1));
    item.unit_price = Some(dec!(10.00));
    item.recompute();
    item
}

#[test]
fn test_matching_id_replaces_in_place() {
    let document_id = Uuid::new_v4();
    let mut items = vec![
        stored_item(document_id, 1),
        stored_item(document_id, 2),
        stored_item(document_id, 3),
    ];
    let target_id = items[1].id;

    let mut canonical = items[1].clone();
    canonical.quantity = Some(dec!(5));
    canonical.recompute();

    let replaced = reconcile_by_id(&mut items, canonical);

    assert!(replaced);
    assert_eq!(items.len(), 3);
    assert_eq!(items[1].id, target_id);
    assert_eq!(items[1].total_value, dec!(50.00));
    // Neighbours are untouched
    assert_eq!(items[0].total_value, dec!(10.00));
    assert_eq!(items[2].total_value, dec!(10.00));
}

#[test]
fn test_unknown_id_appends() {
    let document_id = Uuid::new_v4();
    let mut items = vec![stored_item(document_id, 1)];

    let fresh = stored_item(document_id, 2);
    let fresh_id = fresh.id;

    let replaced = reconcile_by_id(&mut items, fresh);

    assert!(!replaced);
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].id, fresh_id);
}

#[test]
fn test_append_into_empty_list() {
    let mut items: Vec<LineItem> = Vec::new();

    let replaced = reconcile_by_id(&mut items, stored_item(Uuid::new_v4(), 1));

    assert!(!replaced);
    assert_eq!(items.len(), 1);
}

/// A canonical entity without an id is kept rather than dropped.
#[test]
fn test_canonical_without_id_is_appended() {
    let document_id = Uuid::new_v4();
    let mut items = vec![stored_item(document_id, 1)];

    let mut orphan = LineItem::new(document_id, 2);
    orphan.set_service(Some(Uuid::new_v4()));

    let replaced = reconcile_by_id(&mut items, orphan);

    assert!(!replaced);
    assert_eq!(items.len(), 2);
}

/// Sequence numbers are display ordinals, not identity: an item that moved
/// position still replaces its original entry.
#[test]
fn test_sequence_number_is_not_identity() {
    let document_id = Uuid::new_v4();
    let mut items = vec![stored_item(document_id, 1), stored_item(document_id, 2)];
    let target_id = items[0].id;

    let mut canonical = items[0].clone();
    canonical.item_seq = 7;

    reconcile_by_id(&mut items, canonical);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, target_id);
    assert_eq!(items[0].item_seq, 7);
}

/// The merge rule is generic over anything carrying an id; documents use
/// the same one.
#[test]
fn test_documents_merge_by_id_too() {
    let mut canonical = Document::new();
    canonical.id = Some(Uuid::new_v4());
    canonical.total_document = dec!(150.00);

    let mut stale = canonical.clone();
    stale.total_document = dec!(0);

    let mut documents = vec![stale];
    let replaced = reconcile_by_id(&mut documents, canonical);

    assert!(replaced);
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].total_document, dec!(150.00));
}
