//! Integration tests for classrooms, enrollments and materials.

use rollcall_db::models::material::CreateMaterial;
use rollcall_db::models::user::{CreateUser, User};
use rollcall_db::repositories::{ClassroomRepo, MaterialRepo, UserRepo};
use sqlx::PgPool;

async fn new_user(pool: &PgPool, email: &str, role: &str, display_name: Option<&str>) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            display_name: display_name.map(str::to_string),
            role: role.to_string(),
        },
    )
    .await
    .unwrap()
}

fn material(classroom_id: i64, uploader_id: i64, path: &str) -> CreateMaterial {
    CreateMaterial {
        classroom_id,
        uploader_id,
        subject_name: "Physics".to_string(),
        unit_name: None,
        file_name: "notes.pdf".to_string(),
        file_path: path.to_string(),
        file_type: "application/pdf".to_string(),
        size_bytes: 42,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owned_and_enrolled_listings(pool: PgPool) {
    let owner = new_user(&pool, "owner@test.com", "owner", Some("Prof")).await;
    let s1 = new_user(&pool, "s1@test.com", "student", None).await;
    let s2 = new_user(&pool, "s2@test.com", "student", None).await;

    let room = ClassroomRepo::create(&pool, owner.id, "CS 101", "ABC123").await.unwrap();
    ClassroomRepo::enroll(&pool, s1.id, room.id).await.unwrap();
    ClassroomRepo::enroll(&pool, s2.id, room.id).await.unwrap();

    let owned = ClassroomRepo::list_owned(&pool, owner.id).await.unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].member_count, 2);

    let enrolled = ClassroomRepo::list_enrolled(&pool, s1.id).await.unwrap();
    assert_eq!(enrolled.len(), 1);
    assert_eq!(enrolled[0].classroom.id, room.id);
    assert_eq!(enrolled[0].owner_name.as_deref(), Some("Prof"));

    assert!(ClassroomRepo::is_member(&pool, s1.id, room.id).await.unwrap());
    assert!(!ClassroomRepo::is_member(&pool, owner.id, room.id).await.unwrap());
    assert_eq!(ClassroomRepo::member_count(&pool, room.id).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_enrollment_violates_unique_constraint(pool: PgPool) {
    let owner = new_user(&pool, "owner@test.com", "owner", None).await;
    let student = new_user(&pool, "s@test.com", "student", None).await;
    let room = ClassroomRepo::create(&pool, owner.id, "CS 101", "ABC123").await.unwrap();

    ClassroomRepo::enroll(&pool, student.id, room.id).await.unwrap();
    let err = ClassroomRepo::enroll(&pool, student.id, room.id).await.unwrap_err();

    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_enrollments_user_classroom"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn join_code_lookup_and_uniqueness(pool: PgPool) {
    let owner = new_user(&pool, "owner@test.com", "owner", None).await;
    let room = ClassroomRepo::create(&pool, owner.id, "CS 101", "ZZZ999").await.unwrap();

    let found = ClassroomRepo::find_by_join_code(&pool, "ZZZ999").await.unwrap();
    assert_eq!(found.map(|c| c.id), Some(room.id));
    assert!(ClassroomRepo::find_by_join_code(&pool, "NOPE00").await.unwrap().is_none());

    let err = ClassroomRepo::create(&pool, owner.id, "CS 102", "ZZZ999").await.unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint()),
        Some("uq_classrooms_join_code")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn materials_listed_newest_first(pool: PgPool) {
    let owner = new_user(&pool, "owner@test.com", "owner", None).await;
    let room = ClassroomRepo::create(&pool, owner.id, "CS 101", "ABC123").await.unwrap();

    let first = MaterialRepo::create(&pool, &material(room.id, owner.id, "1/a.pdf")).await.unwrap();
    let second = MaterialRepo::create(&pool, &material(room.id, owner.id, "1/b.pdf")).await.unwrap();

    let listed = MaterialRepo::list_for_classroom(&pool, room.id).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let found = MaterialRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    assert_eq!(found.file_path, "1/a.pdf");
}
