use roster_core::db::open_db_in_memory;
use roster_core::{
    NotificationRequest, RegistrationRequest, RosterService, SqliteRosterRepository, Student,
    SuspensionRequest, Teacher,
};
use rusqlite::Connection;

/// Seeds two teachers, five students, and tom's roster of jerry and spike.
fn setup() -> Connection {
    let conn = open_db_in_memory().unwrap();
    {
        let repo = SqliteRosterRepository::try_new(&conn).unwrap();
        for teacher in ["tom@gmail.com", "quacker@gmail.com"] {
            repo.insert_teacher(&Teacher::new(teacher)).unwrap();
        }
        for student in [
            "jerry@gmail.com",
            "spike@gmail.com",
            "tyke@gmail.com",
            "nibbles@gmail.com",
            "butch@gmail.com",
        ] {
            repo.insert_student(&Student::new(student)).unwrap();
        }

        RosterService::new(repo)
            .register(&RegistrationRequest {
                teacher: "tom@gmail.com".to_string(),
                students: vec!["jerry@gmail.com".to_string(), "spike@gmail.com".to_string()],
            })
            .unwrap();
    }
    conn
}

fn notify(teacher: &str, notification: &str) -> NotificationRequest {
    NotificationRequest {
        teacher: teacher.to_string(),
        notification: notification.to_string(),
    }
}

fn suspend(service: &RosterService<SqliteRosterRepository<'_>>, student: &str) {
    service
        .suspend(&SuspensionRequest {
            student: student.to_string(),
        })
        .unwrap();
}

#[test]
fn mentions_are_merged_with_the_roster_minus_suspended() {
    let conn = setup();
    let service = RosterService::new(SqliteRosterRepository::try_new(&conn).unwrap());
    suspend(&service, "spike@gmail.com");

    let response = service
        .resolve_recipients(&notify(
            "tom@gmail.com",
            "Hello students! @tyke@gmail.com @nibbles@gmail.com",
        ))
        .unwrap();
    assert_eq!(
        response.recipients,
        vec!["jerry@gmail.com", "nibbles@gmail.com", "tyke@gmail.com"]
    );
}

#[test]
fn notification_without_mentions_reaches_the_roster() {
    let conn = setup();
    let service = RosterService::new(SqliteRosterRepository::try_new(&conn).unwrap());

    let response = service
        .resolve_recipients(&notify("tom@gmail.com", "Hey everybody"))
        .unwrap();
    assert_eq!(response.recipients, vec!["jerry@gmail.com", "spike@gmail.com"]);
}

#[test]
fn rostered_and_repeated_mentions_appear_once() {
    let conn = setup();
    let service = RosterService::new(SqliteRosterRepository::try_new(&conn).unwrap());

    let response = service
        .resolve_recipients(&notify(
            "tom@gmail.com",
            "@jerry@gmail.com @tyke@gmail.com @jerry@gmail.com",
        ))
        .unwrap();
    assert_eq!(
        response.recipients,
        vec!["jerry@gmail.com", "spike@gmail.com", "tyke@gmail.com"]
    );
}

#[test]
fn teacher_without_roster_reaches_only_mentions() {
    let conn = setup();
    let service = RosterService::new(SqliteRosterRepository::try_new(&conn).unwrap());

    assert!(service
        .resolve_recipients(&notify("quacker@gmail.com", "Nobody here"))
        .unwrap()
        .recipients
        .is_empty());

    let response = service
        .resolve_recipients(&notify("quacker@gmail.com", "@butch@gmail.com see me"))
        .unwrap();
    assert_eq!(response.recipients, vec!["butch@gmail.com"]);
}

#[test]
fn suspended_mention_is_not_a_recipient() {
    let conn = setup();
    let service = RosterService::new(SqliteRosterRepository::try_new(&conn).unwrap());
    suspend(&service, "tyke@gmail.com");

    let response = service
        .resolve_recipients(&notify("quacker@gmail.com", "@tyke@gmail.com detention"))
        .unwrap();
    assert!(response.recipients.is_empty());
}

#[test]
fn invalid_mentions_then_teacher_are_reported() {
    let conn = setup();
    let service = RosterService::new(SqliteRosterRepository::try_new(&conn).unwrap());

    let err = service
        .resolve_recipients(&notify("tomgmail.com", "hi @tykegmail.com and @jerry@gmail.com"))
        .unwrap_err();
    assert_eq!(err.status(), 400);
    assert_eq!(
        err.to_string(),
        "invalid_email: You have provided one or more invalid emails: 'tykegmail.com', 'tomgmail.com'"
    );
}

#[test]
fn merged_mentions_are_rejected() {
    let conn = setup();
    let service = RosterService::new(SqliteRosterRepository::try_new(&conn).unwrap());

    let err = service
        .resolve_recipients(&notify(
            "tom@gmail.com",
            "@tyke@gmail.com@nibbles@gmail.com hello",
        ))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid_email: You have provided one or more invalid emails: 'tyke@gmail.com@nibbles@gmail.com'"
    );
}

#[test]
fn unknown_teacher_and_mentions_are_reported_together() {
    let conn = setup();
    let service = RosterService::new(SqliteRosterRepository::try_new(&conn).unwrap());

    let err = service
        .resolve_recipients(&notify("droopy@gmail.com", "@ghost@gmail.com @jerry@gmail.com"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "non_existent_teacher_and_students: 'droopy@gmail.com' does not exist as a teacher and 'ghost@gmail.com' do(es) not exist as student(s)"
    );

    let err = service
        .resolve_recipients(&notify("tom@gmail.com", "@ghost@gmail.com"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "non_existent_students: The email(s) 'ghost@gmail.com' do(es) not exist as student(s)"
    );

    let err = service
        .resolve_recipients(&notify("droopy@gmail.com", "no mentions"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "non_existent_teacher: The email 'droopy@gmail.com' does not exist as a teacher"
    );
}

#[test]
fn multi_at_student_is_reached_through_the_roster_only() {
    let conn = setup();
    let service = RosterService::new(SqliteRosterRepository::try_new(&conn).unwrap());
    service
        .repository()
        .insert_student(&Student::new("a@b@gmail.com"))
        .unwrap();
    service
        .register(&RegistrationRequest {
            teacher: "quacker@gmail.com".to_string(),
            students: vec!["a@b@gmail.com".to_string()],
        })
        .unwrap();

    let response = service
        .resolve_recipients(&notify("quacker@gmail.com", "Reminder"))
        .unwrap();
    assert_eq!(response.recipients, vec!["a@b@gmail.com"]);

    let err = service
        .resolve_recipients(&notify("quacker@gmail.com", "@a@b@gmail.com reminder"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid_email: You have provided one or more invalid emails: 'a@b@gmail.com'"
    );
}
