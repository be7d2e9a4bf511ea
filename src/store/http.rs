use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use crate::domain::email::{Draft, Email, EmailId, EmailSummary, Mailbox};
use crate::store::repo::{MailboxStore, StoreError, StoreResult};

#[derive(Deserialize)]
struct SendOk {
    message: String,
}

#[derive(Deserialize)]
struct SendErr {
    error: String,
}

/// `MailboxStore` over the service's JSON API.
pub struct HttpStore {
    base: Url,
    client: Client,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> StoreResult<Self> {
        // `Url::join` drops the last path segment unless it ends with '/'
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> StoreResult<Url> {
        Ok(self.base.join(path)?)
    }

    fn put_flags(&self, id: EmailId, flags: serde_json::Value) -> StoreResult<()> {
        let resp = self
            .client
            .put(self.url(&format!("emails/{id}"))?)
            .json(&flags)
            .send()?;
        check_status(resp).map(|_| ())
    }
}

fn check_status(resp: Response) -> StoreResult<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(StoreError::Status {
            status: status.as_u16(),
        })
    }
}

fn read_json<T: DeserializeOwned>(resp: Response) -> StoreResult<T> {
    let bytes = resp.bytes()?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl MailboxStore for HttpStore {
    fn list_mailbox(&self, mailbox: Mailbox) -> StoreResult<Vec<EmailSummary>> {
        let resp = self
            .client
            .get(self.url(&format!("emails/{mailbox}"))?)
            .send()?;
        read_json(check_status(resp)?)
    }

    fn get_email(&self, id: EmailId) -> StoreResult<Email> {
        let resp = self.client.get(self.url(&format!("emails/{id}"))?).send()?;
        read_json(check_status(resp)?)
    }

    fn mark_read(&self, id: EmailId) -> StoreResult<()> {
        self.put_flags(id, json!({ "read": true }))
    }

    fn set_archived(&self, id: EmailId, archived: bool) -> StoreResult<()> {
        self.put_flags(id, json!({ "archived": archived }))
    }

    fn send_email(&self, draft: &Draft) -> StoreResult<String> {
        let resp = self
            .client
            .post(self.url("emails")?)
            .json(draft)
            .send()?;

        let status = resp.status();
        let bytes = resp.bytes()?;
        if status.is_success() {
            let ok: SendOk = serde_json::from_slice(&bytes)?;
            return Ok(ok.message);
        }

        match serde_json::from_slice::<SendErr>(&bytes) {
            Ok(e) => Err(StoreError::Rejected {
                status: status.as_u16(),
                error: e.error,
            }),
            Err(_) => Err(StoreError::Status {
                status: status.as_u16(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let s = HttpStore::new("http://127.0.0.1:8000/mail", None).unwrap();
        assert_eq!(s.base_url().as_str(), "http://127.0.0.1:8000/mail/");
        assert_eq!(
            s.url("emails/inbox").unwrap().as_str(),
            "http://127.0.0.1:8000/mail/emails/inbox"
        );
    }

    #[test]
    fn rejects_garbage_base_url() {
        assert!(matches!(
            HttpStore::new("not a url", None),
            Err(StoreError::Url(_))
        ));
    }
}
