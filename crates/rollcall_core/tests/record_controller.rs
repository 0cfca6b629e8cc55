use rollcall_core::{
    ControllerError, EditState, KeyValueStore, KvStudentRepository, MemoryStore, RecordController,
    RepoError, StudentFields, StudentId, StudentRepository, STUDENTS_STORAGE_KEY,
};

fn fields(first_name: &str) -> StudentFields {
    StudentFields::new(
        first_name,
        "Student",
        format!("{}@school.edu", first_name.to_lowercase()),
    )
}

#[test]
fn load_populates_cache_from_existing_storage() {
    let mut store = MemoryStore::new();
    {
        let mut repo = KvStudentRepository::new(&mut store);
        repo.create(&fields("A")).unwrap();
        repo.create(&fields("B")).unwrap();
    }

    let controller = RecordController::load(KvStudentRepository::new(store));
    let names = controller
        .students()
        .iter()
        .map(|student| student.fields.first_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(controller.edit_state(), &EditState::Idle);
}

#[test]
fn add_appends_returned_record_to_cache() {
    let mut controller = RecordController::load(KvStudentRepository::new(MemoryStore::new()));
    let created = controller.add(&fields("Alice")).unwrap();

    assert_eq!(controller.students(), &[created.clone()]);
    assert_eq!(controller.repository().list_all(), vec![created]);
    assert!(!controller.is_editing());
}

#[test]
fn submit_updates_storage_and_resyncs_cache() {
    let mut controller = RecordController::load(KvStudentRepository::new(MemoryStore::new()));
    let a = controller.add(&fields("A")).unwrap();
    let b = controller.add(&fields("B")).unwrap();

    // Another tab adds a record behind this session's back.
    controller
        .repository_mut()
        .create(&fields("External"))
        .unwrap();
    assert_eq!(controller.students().len(), 2);

    controller.begin_edit(b.clone());
    let mut edited = b.fields.clone();
    edited.first_name = "B2".to_string();
    assert!(controller.submit(&edited).unwrap());

    assert_eq!(controller.edit_state(), &EditState::Idle);
    let cached = controller.students();
    assert_eq!(cached.len(), 3);
    assert_eq!(cached[0], a);
    assert_eq!(cached[1].id, b.id);
    assert_eq!(cached[1].fields.first_name, "B2");
    assert_eq!(cached[2].fields.first_name, "External");
}

#[test]
fn submit_for_vanished_record_keeps_target_and_cache() {
    let mut controller = RecordController::load(KvStudentRepository::new(MemoryStore::new()));
    let a = controller.add(&fields("A")).unwrap();
    controller.begin_edit(a.clone());

    // Removed by another session; this cache still shows it.
    controller.repository_mut().delete(&a.id).unwrap();

    assert!(!controller.submit(&fields("A2")).unwrap());
    assert_eq!(controller.editing(), Some(&a));
    assert_eq!(controller.students(), &[a]);
}

#[test]
fn failed_write_keeps_target_and_cache_unchanged() {
    let mut controller =
        RecordController::load(KvStudentRepository::new(MemoryStore::with_quota(600)));
    let a = controller.add(&fields("A")).unwrap();
    controller.begin_edit(a.clone());

    let mut huge = a.fields.clone();
    huge.address = "y".repeat(2_000);
    let err = controller.submit(&huge).unwrap_err();
    assert!(matches!(err, ControllerError::Repo(RepoError::Store(_))));
    assert_eq!(controller.editing(), Some(&a));
    assert_eq!(controller.students(), &[a.clone()]);

    let err = controller.add(&huge).unwrap_err();
    assert!(matches!(err, ControllerError::Repo(_)));
    assert_eq!(controller.students(), &[a]);
}

#[test]
fn delete_filters_cache_only_on_confirmed_removal() {
    let mut controller = RecordController::load(KvStudentRepository::new(MemoryStore::new()));
    let a = controller.add(&fields("A")).unwrap();
    let b = controller.add(&fields("B")).unwrap();
    controller.begin_edit(b.clone());

    assert!(!controller.delete(&StudentId::from("missing")).unwrap());
    assert_eq!(controller.students().len(), 2);

    assert!(controller.delete(&a.id).unwrap());
    assert_eq!(controller.students(), &[b.clone()]);
    assert_eq!(controller.editing(), Some(&b));
}

#[test]
fn refresh_picks_up_external_changes() {
    let mut controller = RecordController::load(KvStudentRepository::new(MemoryStore::new()));
    controller.add(&fields("A")).unwrap();

    controller
        .repository_mut()
        .store_mut()
        .remove_item(STUDENTS_STORAGE_KEY)
        .unwrap();
    assert_eq!(controller.students().len(), 1);
    assert!(controller.refresh().is_empty());
}
