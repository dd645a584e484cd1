use roster_core::db::open_db_in_memory;
use roster_core::{RosterError, RosterService, SqliteRosterRepository, Student, SuspensionRequest};
use rusqlite::Connection;

fn setup(students: &[&str]) -> Connection {
    let conn = open_db_in_memory().unwrap();
    {
        let repo = SqliteRosterRepository::try_new(&conn).unwrap();
        for student in students {
            repo.insert_student(&Student::new(*student)).unwrap();
        }
    }
    conn
}

fn request(student: &str) -> SuspensionRequest {
    SuspensionRequest {
        student: student.to_string(),
    }
}

#[test]
fn suspend_marks_only_the_named_student() {
    let conn = setup(&["jerry@gmail.com", "spike@gmail.com"]);
    let service = RosterService::new(SqliteRosterRepository::try_new(&conn).unwrap());

    service.suspend(&request("jerry@gmail.com")).unwrap();

    let repo = service.repository();
    assert!(repo.get_student("jerry@gmail.com").unwrap().unwrap().suspended);
    assert!(!repo.get_student("spike@gmail.com").unwrap().unwrap().suspended);
}

#[test]
fn suspending_twice_still_succeeds() {
    let conn = setup(&["jerry@gmail.com"]);
    let service = RosterService::new(SqliteRosterRepository::try_new(&conn).unwrap());

    service.suspend(&request("jerry@gmail.com")).unwrap();
    service.suspend(&request("jerry@gmail.com")).unwrap();
    assert!(
        service
            .repository()
            .get_student("jerry@gmail.com")
            .unwrap()
            .unwrap()
            .suspended
    );
}

#[test]
fn invalid_student_email_is_rejected() {
    let conn = setup(&[]);
    let service = RosterService::new(SqliteRosterRepository::try_new(&conn).unwrap());

    let err = service.suspend(&request("jerry@gmailcom")).unwrap_err();
    assert_eq!(err.status(), 400);
    assert_eq!(
        err.to_string(),
        "invalid_email: You have provided one or more invalid emails: 'jerry@gmailcom'"
    );
}

#[test]
fn unknown_student_is_reported() {
    let conn = setup(&["spike@gmail.com"]);
    let service = RosterService::new(SqliteRosterRepository::try_new(&conn).unwrap());

    let err = service.suspend(&request("jerry@gmail.com")).unwrap_err();
    assert!(matches!(err, RosterError::NonExistentStudent(ref email) if email == "jerry@gmail.com"));
    assert_eq!(
        err.to_string(),
        "non_existent_student: The email 'jerry@gmail.com' does not exist as a student"
    );
}
