use keepnotes_core::{
    KeyValueStore, MemoryKeyValueStore, NoteDraft, NoteStore, NoteStoreConfig, NoteStoreError,
    NoteValidationError, ValidationPolicy,
};
use std::collections::HashSet;

fn store_with(policy: ValidationPolicy) -> NoteStore<MemoryKeyValueStore> {
    NoteStore::load(
        MemoryKeyValueStore::new(),
        NoteStoreConfig::default().with_validation_policy(policy),
    )
}

fn seeded(count: usize) -> NoteStore<MemoryKeyValueStore> {
    let mut store = store_with(ValidationPolicy::AnyField);
    for idx in 1..=count {
        store
            .create_note(&NoteDraft::new(format!("note {idx}"), "", "body"))
            .unwrap();
    }
    store
}

fn stored_blob(store: &NoteStore<MemoryKeyValueStore>) -> Option<String> {
    store.storage().get("notes").unwrap()
}

#[test]
fn create_appends_note_equal_to_draft() {
    let mut store = seeded(2);
    let draft = NoteDraft::new("Groceries", "weekend", "milk, eggs");

    let created = store.create_note(&draft).unwrap();

    assert_eq!(store.len(), 3);
    let last = store.notes().last().unwrap();
    assert_eq!(last, &created);
    assert_eq!(last.title, "Groceries");
    assert_eq!(last.tagline, "weekend");
    assert_eq!(last.body, "milk, eggs");
    assert!(!last.is_pinned);
}

#[test]
fn create_honours_explicit_pin() {
    let mut store = seeded(0);
    let created = store
        .create_note(&NoteDraft::new("pinned", "", "").pinned(true))
        .unwrap();
    assert!(created.is_pinned);
}

#[test]
fn rejected_drafts_leave_collection_and_blob_unchanged() {
    let mut store = store_with(ValidationPolicy::TitleAndBody);
    let kept = store.create_note(&NoteDraft::new("t", "", "b")).unwrap();
    let notes_before = store.notes().to_vec();
    let blob_before = stored_blob(&store);

    let err = store
        .create_note(&NoteDraft::new("title only", "tag", ""))
        .unwrap_err();
    assert!(matches!(
        err,
        NoteStoreError::Validation(NoteValidationError::MissingBody)
    ));

    let err = store
        .update_note(kept.id, &NoteDraft::new("", "", "body only"))
        .unwrap_err();
    assert!(matches!(
        err,
        NoteStoreError::Validation(NoteValidationError::MissingTitle)
    ));

    assert_eq!(store.notes(), notes_before.as_slice());
    assert_eq!(stored_blob(&store), blob_before);
}

#[test]
fn update_replaces_in_place_and_preserves_pin() {
    let mut store = seeded(3);
    let target = store.notes()[1].id;
    store.toggle_pin(target).unwrap();
    let order_before: Vec<_> = store.notes().iter().map(|note| note.id).collect();

    let updated = store
        .update_note(target, &NoteDraft::new("renamed", "new tag", "new body"))
        .unwrap();

    assert_eq!(updated.id, target);
    assert!(updated.is_pinned);
    let order_after: Vec<_> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(order_before, order_after);
    assert_eq!(store.get_note(target).unwrap().title, "renamed");

    let unpinned = store
        .update_note(target, &NoteDraft::new("renamed", "", "").pinned(false))
        .unwrap();
    assert!(!unpinned.is_pinned);
}

#[test]
fn stale_ids_fail_with_not_found() {
    let mut store = seeded(2);
    let removed = store.notes()[0].id;
    store.delete_note(removed).unwrap();

    assert!(matches!(
        store.delete_note(removed),
        Err(NoteStoreError::NoteNotFound(id)) if id == removed
    ));
    assert!(matches!(
        store.toggle_pin(removed),
        Err(NoteStoreError::NoteNotFound(_))
    ));
    assert!(matches!(
        store.update_note(removed, &NoteDraft::new("x", "", "")),
        Err(NoteStoreError::NoteNotFound(_))
    ));
    assert_eq!(store.len(), 1);
}

#[test]
fn toggle_pin_twice_restores_flag_and_membership() {
    let mut store = seeded(4);
    let target = store.notes()[2].id;
    let members: HashSet<_> = store.notes().iter().map(|note| note.id).collect();

    assert!(store.toggle_pin(target).unwrap());
    assert!(!store.toggle_pin(target).unwrap());

    assert!(!store.get_note(target).unwrap().is_pinned);
    let after: HashSet<_> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(members, after);
}

#[test]
fn pinning_fourth_of_five_moves_it_first_and_keeps_others_in_order() {
    let mut store = seeded(5);
    let ids: Vec<_> = store.notes().iter().map(|note| note.id).collect();

    store.toggle_pin(ids[3]).unwrap();

    let view: Vec<_> = store.sorted_view().iter().map(|note| note.id).collect();
    assert_eq!(view, vec![ids[3], ids[0], ids[1], ids[2], ids[4]]);
    let stored: Vec<_> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(stored, view);
}

#[test]
fn sorted_view_is_pinned_first_permutation() {
    let mut store = seeded(8);
    let ids: Vec<_> = store.notes().iter().map(|note| note.id).collect();
    for id in [ids[1], ids[6], ids[4]] {
        store.toggle_pin(id).unwrap();
    }
    store
        .create_note(&NoteDraft::new("late pinned", "", "").pinned(true))
        .unwrap();

    let view = store.sorted_view();
    assert_eq!(view.len(), store.len());
    let first_unpinned = view
        .iter()
        .position(|note| !note.is_pinned)
        .unwrap_or(view.len());
    assert!(view[first_unpinned..].iter().all(|note| !note.is_pinned));
    assert_eq!(first_unpinned, 4);

    let view_ids: HashSet<_> = view.iter().map(|note| note.id).collect();
    let store_ids: HashSet<_> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(view_ids, store_ids);
}

#[test]
fn seven_notes_paginate_into_six_and_one() {
    let store = seeded(7);
    let ids: Vec<_> = store.notes().iter().map(|note| note.id).collect();

    assert_eq!(store.total_pages(6), 2);
    let first: Vec<_> = store.page(1, 6).iter().map(|note| note.id).collect();
    let second: Vec<_> = store.page(2, 6).iter().map(|note| note.id).collect();
    assert_eq!(first, ids[..6].to_vec());
    assert_eq!(second, vec![ids[6]]);
    assert!(store.page(3, 6).is_empty());
    assert!(store.page(0, 6).is_empty());
}

#[test]
fn page_is_idempotent_without_mutation() {
    let mut store = seeded(9);
    let pin = store.notes()[7].id;
    store.toggle_pin(pin).unwrap();

    assert_eq!(store.page(2, 4), store.page(2, 4));
    assert_eq!(store.page(1, 4)[0].id, pin);
}

#[test]
fn empty_collection_has_one_page() {
    let store = seeded(0);
    assert_eq!(store.total_pages(6), 1);
    assert!(store.page(1, 6).is_empty());
}

#[test]
fn every_mutation_persists_full_collection() {
    let mut store = seeded(0);
    let created = store.create_note(&NoteDraft::new("a", "", "")).unwrap();
    let blob = stored_blob(&store).unwrap();
    assert!(blob.contains(&created.id.to_string()));

    store.toggle_pin(created.id).unwrap();
    let blob = stored_blob(&store).unwrap();
    assert!(blob.contains("\"isPinned\":true"));

    store.delete_note(created.id).unwrap();
    assert_eq!(stored_blob(&store).as_deref(), Some("[]"));
    assert!(!store.is_dirty());
}
