use shelter_core::db::{open_db, open_db_in_memory};
use shelter_core::{
    DogRepository, InMemoryDogRepository, NewDog, RepoError, SqliteDogRepository, SqliteDogStore,
};
use std::collections::HashSet;

fn new_dog(name: &str) -> NewDog {
    NewDog {
        name: name.to_string(),
        race: "Labrador".to_string(),
        color: "Brown".to_string(),
        photo: "photo.jpg".to_string(),
        number: "123".to_string(),
        illnesses: "None".to_string(),
    }
}

fn rex() -> NewDog {
    NewDog {
        name: "Rex".to_string(),
        race: "Owczarek Niemiecki".to_string(),
        color: "Czarno-Brązowy".to_string(),
        photo: "rex.jpg".to_string(),
        number: "456".to_string(),
        illnesses: "Brak".to_string(),
    }
}

#[test]
fn list_on_empty_store_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDogRepository::new(&conn);

    assert!(repo.list_dogs().unwrap().is_empty());
}

#[test]
fn insert_then_list_returns_matching_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDogRepository::new(&conn);

    repo.insert_dog(&rex()).unwrap();

    let dogs = repo.list_dogs().unwrap();
    assert_eq!(dogs.len(), 1);
    let dog = &dogs[0];
    assert_eq!(dog.name, "Rex");
    assert_eq!(dog.race, "Owczarek Niemiecki");
    assert_eq!(dog.color, "Czarno-Brązowy");
    assert_eq!(dog.photo, "rex.jpg");
    assert_eq!(dog.number, "456");
    assert_eq!(dog.illnesses, "Brak");
}

#[test]
fn inserted_records_get_unique_ids_in_list_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDogRepository::new(&conn);

    for name in ["Buddy", "Azor", "Burek"] {
        repo.insert_dog(&new_dog(name)).unwrap();
    }

    let dogs = repo.list_dogs().unwrap();
    let ids: HashSet<_> = dogs.iter().map(|dog| dog.id).collect();
    assert_eq!(ids.len(), 3);
    assert!(dogs.windows(2).all(|pair| pair[0].id < pair[1].id));
    let names: Vec<_> = dogs.iter().map(|dog| dog.name.as_str()).collect();
    assert_eq!(names, vec!["Buddy", "Azor", "Burek"]);
}

#[test]
fn delete_removes_only_the_target_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDogRepository::new(&conn);
    repo.insert_dog(&new_dog("Buddy")).unwrap();
    repo.insert_dog(&new_dog("Azor")).unwrap();

    let buddy_id = repo.list_dogs().unwrap()[0].id;
    repo.delete_dog(buddy_id).unwrap();

    let dogs = repo.list_dogs().unwrap();
    assert_eq!(dogs.len(), 1);
    assert_eq!(dogs[0].name, "Azor");
}

#[test]
fn delete_missing_id_is_a_no_op() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDogRepository::new(&conn);
    repo.insert_dog(&new_dog("Buddy")).unwrap();

    repo.delete_dog(9_999).unwrap();

    assert_eq!(repo.list_dogs().unwrap().len(), 1);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDogRepository::new(&conn);
    repo.insert_dog(&new_dog("Buddy")).unwrap();
    let first_id = repo.list_dogs().unwrap()[0].id;
    repo.delete_dog(first_id).unwrap();

    repo.insert_dog(&new_dog("Azor")).unwrap();

    assert!(repo.list_dogs().unwrap()[0].id > first_id);
}

#[test]
fn list_maps_columns_by_name_not_position() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "DROP TABLE dogs;
         CREATE TABLE dogs (
            illnesses TEXT NOT NULL,
            number TEXT NOT NULL,
            photo TEXT NOT NULL,
            color TEXT NOT NULL,
            race TEXT NOT NULL,
            name TEXT NOT NULL,
            id INTEGER PRIMARY KEY AUTOINCREMENT
         );
         INSERT INTO dogs (illnesses, number, photo, color, race, name)
         VALUES ('None', '123', 'photo.jpg', 'Brown', 'Labrador', 'Buddy');",
    )
    .unwrap();
    let repo = SqliteDogRepository::new(&conn);

    let dogs = repo.list_dogs().unwrap();
    assert_eq!(dogs.len(), 1);
    assert_eq!(dogs[0].name, "Buddy");
    assert_eq!(dogs[0].race, "Labrador");
    assert_eq!(dogs[0].illnesses, "None");
}

#[test]
fn list_rejects_table_missing_a_schema_column() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "DROP TABLE dogs;
         CREATE TABLE dogs (id INTEGER PRIMARY KEY, name TEXT NOT NULL);",
    )
    .unwrap();
    let repo = SqliteDogRepository::new(&conn);

    let err = repo.list_dogs().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(ref message) if message.contains("race")));
    assert!(!err.is_unavailable());
}

#[test]
fn store_opens_a_connection_per_operation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelter.sqlite3");
    let store = SqliteDogStore::new(&path);

    store.insert_dog(&rex()).unwrap();
    store.insert_dog(&new_dog("Buddy")).unwrap();

    let conn = open_db(&path).unwrap();
    let dogs = SqliteDogRepository::new(&conn).list_dogs().unwrap();
    assert_eq!(dogs.len(), 2);

    store.delete_dog(dogs[0].id).unwrap();
    let remaining = store.list_dogs().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Buddy");
}

#[test]
fn store_reports_unavailable_when_file_cannot_be_opened() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteDogStore::new(dir.path().join("missing-dir").join("shelter.sqlite3"));

    assert!(store.connect().unwrap_err().is_unavailable());
    assert!(store.list_dogs().unwrap_err().is_unavailable());
    assert!(store.insert_dog(&rex()).unwrap_err().is_unavailable());
    assert!(store.delete_dog(1).unwrap_err().is_unavailable());
}

#[test]
fn store_reports_unavailable_when_file_is_not_a_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelter.sqlite3");
    std::fs::write(&path, vec![0x42_u8; 4096]).unwrap();
    let store = SqliteDogStore::new(&path);

    let err = store.list_dogs().unwrap_err();
    assert!(err.is_unavailable(), "unexpected error: {err}");
    assert!(store.insert_dog(&rex()).unwrap_err().is_unavailable());
    assert!(store.delete_dog(1).unwrap_err().is_unavailable());
}

#[test]
fn store_reports_unavailable_while_another_writer_holds_the_lock() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.sqlite3");
    let blocker = rusqlite::Connection::open(&path).unwrap();
    blocker.execute_batch("BEGIN EXCLUSIVE;").unwrap();

    let err = SqliteDogStore::new(&path).list_dogs().unwrap_err();
    assert!(err.is_unavailable(), "unexpected error: {err}");

    blocker.execute_batch("COMMIT;").unwrap();
}

#[test]
fn in_memory_repository_honors_the_same_contract() {
    let repo = InMemoryDogRepository::new();
    assert!(repo.list_dogs().unwrap().is_empty());

    repo.insert_dog(&rex()).unwrap();
    repo.insert_dog(&new_dog("Buddy")).unwrap();
    repo.delete_dog(42).unwrap();

    let dogs = repo.list_dogs().unwrap();
    assert_eq!(dogs.len(), 2);
    assert_eq!(dogs[0].name, "Rex");

    repo.delete_dog(dogs[0].id).unwrap();
    assert_eq!(repo.list_dogs().unwrap()[0].name, "Buddy");
}
