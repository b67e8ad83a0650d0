use attendance_core::{AttendanceStatus, AttendanceStore, StoreError, Student, ValidationError};

#[test]
fn add_and_list_students_sorted_by_name() {
    let store = AttendanceStore::open_in_memory().unwrap();

    assert!(store.add_student("S2", "Grace Hopper").unwrap());
    assert!(store.add_student("S1", "Alan Turing").unwrap());
    assert!(store.add_student("S3", "Barbara Liskov").unwrap());

    let names: Vec<String> = store
        .list_students()
        .unwrap()
        .into_iter()
        .map(|student| student.full_name)
        .collect();
    assert_eq!(names, ["Alan Turing", "Barbara Liskov", "Grace Hopper"]);
}

#[test]
fn duplicate_student_id_returns_false_and_keeps_existing_row() {
    let store = AttendanceStore::open_in_memory().unwrap();

    assert!(store.add_student("S1", "Ada Lovelace").unwrap());
    assert!(!store.add_student("S1", "Someone Else").unwrap());

    let students = store.list_students().unwrap();
    assert_eq!(
        students,
        vec![Student {
            id: "S1".to_string(),
            full_name: "Ada Lovelace".to_string(),
        }]
    );
}

#[test]
fn update_student_renames_and_unknown_id_is_noop() {
    let store = AttendanceStore::open_in_memory().unwrap();
    store.add_student("S1", "Ada Byron").unwrap();

    store.update_student("S1", "Ada Lovelace").unwrap();
    store.update_student("missing", "Nobody").unwrap();

    let students = store.list_students().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].id, "S1");
    assert_eq!(students[0].full_name, "Ada Lovelace");
    assert_eq!(
        store.get_student("S1").unwrap().unwrap().full_name,
        "Ada Lovelace"
    );
    assert!(store.get_student("missing").unwrap().is_none());
}

#[test]
fn delete_student_removes_row_and_unknown_id_is_noop() {
    let store = AttendanceStore::open_in_memory().unwrap();
    store.add_student("S1", "Ada Lovelace").unwrap();
    store.add_student("S2", "Alan Turing").unwrap();

    store.delete_student("S1").unwrap();
    store.delete_student("S1").unwrap();

    let ids: Vec<String> = store
        .list_students()
        .unwrap()
        .into_iter()
        .map(|student| student.id)
        .collect();
    assert_eq!(ids, ["S2"]);
}

#[test]
fn blank_student_input_is_rejected_before_writing() {
    let store = AttendanceStore::open_in_memory().unwrap();

    let err = store.add_student("  ", "Ada").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::EmptyStudentId)
    ));
    let err = store.add_student("S1", "").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::EmptyStudentName)
    ));
    assert!(store.list_students().unwrap().is_empty());
}

#[test]
fn add_and_list_classes_sorted_by_name_with_increasing_ids() {
    let store = AttendanceStore::open_in_memory().unwrap();

    assert!(store.add_class("Physics").unwrap());
    assert!(store.add_class("Algebra").unwrap());

    let classes = store.list_classes().unwrap();
    assert_eq!(classes.len(), 2);
    assert_eq!(classes[0].name, "Algebra");
    assert_eq!(classes[1].name, "Physics");
    assert!(classes[0].id > classes[1].id);
}

#[test]
fn duplicate_class_name_returns_false() {
    let store = AttendanceStore::open_in_memory().unwrap();

    assert!(store.add_class("Chemistry").unwrap());
    assert!(!store.add_class("Chemistry").unwrap());
    assert!(!store.add_class("  Chemistry ").unwrap());

    assert_eq!(store.list_classes().unwrap().len(), 1);
}

#[test]
fn class_ids_are_not_reused_after_delete() {
    let store = AttendanceStore::open_in_memory().unwrap();
    store.add_class("History").unwrap();
    let first_id = store.list_classes().unwrap()[0].id;

    store.delete_class(first_id).unwrap();
    store.add_class("Geography").unwrap();

    let second_id = store.list_classes().unwrap()[0].id;
    assert!(second_id > first_id);
}

#[test]
fn update_class_renames_and_rejects_taken_name() {
    let store = AttendanceStore::open_in_memory().unwrap();
    store.add_class("Art").unwrap();
    store.add_class("Music").unwrap();
    let art = store
        .list_classes()
        .unwrap()
        .into_iter()
        .find(|class| class.name == "Art")
        .unwrap();

    assert!(store.update_class(art.id, "Fine Art").unwrap());
    assert_eq!(store.get_class(art.id).unwrap().unwrap().name, "Fine Art");

    assert!(!store.update_class(art.id, "Music").unwrap());
    assert_eq!(store.get_class(art.id).unwrap().unwrap().name, "Fine Art");

    assert!(store.update_class(9_999, "Drama").unwrap());
    assert!(store.get_class(9_999).unwrap().is_none());
}

#[test]
fn blank_class_name_is_rejected() {
    let store = AttendanceStore::open_in_memory().unwrap();

    let err = store.add_class("   ").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::EmptyClassName)
    ));
}

#[test]
fn student_ids_with_surrounding_whitespace_are_reachable_verbatim() {
    let mut store = AttendanceStore::open_in_memory().unwrap();
    store
        .connection()
        .execute(
            "INSERT INTO students (student_id, full_name) VALUES ('S1 ', 'Ada Byron');",
            [],
        )
        .unwrap();
    store.add_class("Math").unwrap();
    let class_id = store.list_classes().unwrap()[0].id;

    store.update_student("S1 ", "Ada Lovelace").unwrap();
    assert_eq!(
        store.get_student("S1 ").unwrap().unwrap().full_name,
        "Ada Lovelace"
    );
    assert!(store.get_student("S1").unwrap().is_none());

    assert!(store.enroll_student("S1 ", class_id).unwrap());
    store
        .mark_attendance("S1 ", class_id, "2024-01-05", AttendanceStatus::Present)
        .unwrap();
    let records = store.attendance_for_date(class_id, "2024-01-05").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].student_id, "S1 ");

    store.delete_student("S1 ").unwrap();
    assert!(store.list_students().unwrap().is_empty());
    assert!(store.attendance_for_date(class_id, "2024-01-05").unwrap().is_empty());
}

#[test]
fn add_student_stores_id_without_rewriting_it() {
    let store = AttendanceStore::open_in_memory().unwrap();

    assert!(store.add_student(" S2", "Alan Turing").unwrap());
    assert!(store.add_student("S2", "Someone Else").unwrap());

    let ids: Vec<String> = store
        .list_students()
        .unwrap()
        .into_iter()
        .map(|student| student.id)
        .collect();
    assert_eq!(ids, [" S2", "S2"]);
}
