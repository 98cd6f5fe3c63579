use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::contact_submission::{
    ContactSubmission, ContactSubmissionListQuery, NewContactSubmission,
};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::realtime::{ChangeBroker, ChangeEvent};
use crate::repository::{ContactSubmissionReader, ContactSubmissionWriter};
use crate::services::{ServiceError, ServiceResult};

const TABLE: &str = "contact_submissions";

/// Store a message left through the public contact form. No authentication:
/// this is the one public write path.
pub fn submit_contact_form<R>(
    repo: &R,
    broker: &ChangeBroker,
    new_submission: &NewContactSubmission,
) -> ServiceResult<ContactSubmission>
where
    R: ContactSubmissionWriter + ?Sized,
{
    let submission = repo
        .create_contact_submission(new_submission)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::insert(TABLE, &submission));
    Ok(submission)
}

/// Load submissions for the admin inbox, newest first.
pub fn load_admin_submissions<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: usize,
) -> ServiceResult<Paginated<ContactSubmission>>
where
    R: ContactSubmissionReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let query = ContactSubmissionListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    let (total, submissions) = repo
        .list_contact_submissions(query)
        .map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    Ok(Paginated::new(submissions, page, total_pages))
}

pub fn delete_submission<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    submission_id: i32,
) -> ServiceResult<()>
where
    R: ContactSubmissionReader + ContactSubmissionWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    // The reader has no by-id lookup; fetch the full set and pick the row
    // so the delete event can carry it. Submission volumes are small.
    let (_, submissions) = repo
        .list_contact_submissions(ContactSubmissionListQuery::new())
        .map_err(ServiceError::from)?;
    let submission = submissions
        .into_iter()
        .find(|submission| submission.id == submission_id)
        .ok_or(ServiceError::NotFound)?;

    repo.delete_contact_submission(submission_id)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::delete(TABLE, &submission));
    Ok(())
}

/// Export every submission as CSV for the admin download link.
pub fn export_submissions_csv<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<u8>>
where
    R: ContactSubmissionReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (_, submissions) = repo
        .list_contact_submissions(ContactSubmissionListQuery::new())
        .map_err(ServiceError::from)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["id", "name", "email", "phone", "subject", "message", "created_at"])
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    for submission in submissions {
        writer
            .write_record([
                submission.id.to_string(),
                submission.name,
                submission.email,
                submission.phone.unwrap_or_default(),
                submission.subject.unwrap_or_default(),
                submission.message,
                submission.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ])
            .map_err(|err| ServiceError::Form(err.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|err| ServiceError::Form(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    use crate::realtime::ChangeKind;
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{MockContactSubmissionReader, MockContactSubmissionWriter};
    use crate::repository::{ContactSubmissionReader as _, ContactSubmissionWriter as _};

    fn submission(id: i32, name: &str) -> ContactSubmission {
        let at = NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(10, 30, 0))
            .unwrap_or_default();
        ContactSubmission {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            subject: Some("Shipping".to_string()),
            message: "Do you ship to Goa?".to_string(),
            created_at: at,
        }
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new("admin@example.com", "Admin", vec!["admin".to_string()])
    }

    #[test]
    fn submit_stores_and_publishes() {
        let mut repo = MockContactSubmissionWriter::new();
        repo.expect_create_contact_submission()
            .times(1)
            .returning(|new_submission| {
                let mut stored = submission(1, &new_submission.name);
                stored.email = new_submission.email.clone();
                Ok(stored)
            });

        let broker = ChangeBroker::new();
        let kinds = Arc::new(Mutex::new(Vec::new()));
        let kinds_clone = Arc::clone(&kinds);
        let _sub = broker.subscribe(TABLE, move |event| {
            kinds_clone.lock().expect("kinds lock").push(event.kind);
        });

        let new_submission = NewContactSubmission {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            phone: None,
            subject: None,
            message: "Hello".to_string(),
        };

        let stored =
            submit_contact_form(&repo, &broker, &new_submission).expect("expected success");
        assert_eq!(stored.email, "ravi@example.com");
        assert_eq!(*kinds.lock().expect("kinds lock"), vec![ChangeKind::Insert]);
    }

    #[test]
    fn export_requires_role() {
        let repo = MockContactSubmissionReader::new();
        let user = AuthenticatedUser::new("viewer@example.com", "Viewer", Vec::new());

        let result = export_submissions_csv(&repo, &user);
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn export_renders_header_and_rows() {
        let mut repo = MockContactSubmissionReader::new();
        repo.expect_list_contact_submissions()
            .returning(|_| Ok((2, vec![submission(2, "Asha"), submission(1, "Ravi")])));

        let bytes = export_submissions_csv(&repo, &admin()).expect("expected success");
        let text = String::from_utf8(bytes).expect("utf-8");
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("id,name,email,phone,subject,message,created_at")
        );
        assert!(lines.next().is_some_and(|line| line.starts_with("2,Asha,")));
        assert!(lines.next().is_some_and(|line| line.starts_with("1,Ravi,")));
    }

    #[test]
    fn delete_publishes_old_row() {
        struct FakeRepo {
            reader: MockContactSubmissionReader,
            writer: MockContactSubmissionWriter,
        }
        impl ContactSubmissionReader for FakeRepo {
            fn list_contact_submissions(
                &self,
                query: ContactSubmissionListQuery,
            ) -> RepositoryResult<(usize, Vec<ContactSubmission>)> {
                self.reader.list_contact_submissions(query)
            }
        }
        impl ContactSubmissionWriter for FakeRepo {
            fn create_contact_submission(
                &self,
                new_submission: &NewContactSubmission,
            ) -> RepositoryResult<ContactSubmission> {
                self.writer.create_contact_submission(new_submission)
            }
            fn delete_contact_submission(&self, submission_id: i32) -> RepositoryResult<()> {
                self.writer.delete_contact_submission(submission_id)
            }
        }

        let mut repo = FakeRepo {
            reader: MockContactSubmissionReader::new(),
            writer: MockContactSubmissionWriter::new(),
        };
        repo.reader
            .expect_list_contact_submissions()
            .returning(|_| Ok((1, vec![submission(5, "Asha")])));
        repo.writer
            .expect_delete_contact_submission()
            .times(1)
            .returning(|_| Ok(()));

        let broker = ChangeBroker::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = Arc::clone(&events);
        let _sub = broker.subscribe(TABLE, move |event| {
            events_clone.lock().expect("events lock").push(event.clone());
        });

        delete_submission(&repo, &admin(), &broker, 5).expect("expected success");

        let events = events.lock().expect("events lock");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ChangeKind::Delete);
        assert_eq!(events[0].old["name"], "Asha");
    }
}
