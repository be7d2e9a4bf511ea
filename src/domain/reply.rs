use crate::domain::email::{Draft, Email};

/// Line that separates quoted segments in a message body.
pub const QUOTE_SEPARATOR: &str = "--------------------------------";

const REPLY_PREFIX: &str = "Re: ";

pub fn reply_subject(subject: &str) -> String {
    if subject.starts_with(REPLY_PREFIX) {
        subject.to_string()
    } else {
        format!("{REPLY_PREFIX}{subject}")
    }
}

/// Quote `email`'s body for a reply.
///
/// The body is split on the separator line into segments. The last segment
/// (the newest text) gets an attribution line above it and a fresh separator
/// below it, then the segments are joined back together. Earlier quotes are
/// left untouched, so every reply adds exactly one segment to the chain.
pub fn quote_body(email: &Email) -> String {
    let sep = format!("\n{QUOTE_SEPARATOR}\n");
    let mut segments: Vec<String> = email.body.split(sep.as_str()).map(str::to_string).collect();

    if let Some(last) = segments.last_mut() {
        *last = format!(
            "{} {} wrote:\n{}{}",
            email.timestamp, email.sender, last, sep
        );
    }

    segments.join(&sep)
}

/// Draft opened by the reply action: addressed to the original sender only.
pub fn reply_draft(email: &Email) -> Draft {
    Draft {
        recipients: email.sender.clone(),
        subject: reply_subject(&email.subject),
        body: quote_body(email),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn email(sender: &str, timestamp: &str, subject: &str, body: &str) -> Email {
        Email {
            id: 1,
            sender: sender.to_string(),
            recipients: vec!["me@x".to_string(), "other@x".to_string()],
            subject: subject.to_string(),
            body: body.to_string(),
            timestamp: timestamp.to_string(),
            read: true,
            archived: false,
        }
    }

    #[test]
    fn subject_prefixed_once() {
        assert_eq!(reply_subject("Hi"), "Re: Hi");
        assert_eq!(reply_subject("Re: Hi"), "Re: Hi");
        assert_eq!(reply_subject(""), "Re: ");
        // only the exact prefix counts
        assert_eq!(reply_subject("RE: Hi"), "Re: RE: Hi");
    }

    #[test]
    fn single_segment_body_gets_one_quote_block() {
        let e = email("a@x", "T1", "Hi", "hello");
        assert_eq!(
            quote_body(&e),
            "T1 a@x wrote:\nhello\n--------------------------------\n"
        );
    }

    #[test]
    fn reply_to_reply_adds_one_segment() {
        // what the first reply looks like once its author typed below the quote
        let first = "T1 a@x wrote:\nhello\n--------------------------------\nhi back";
        let e = email("b@x", "T2", "Re: Hi", first);

        let quoted = quote_body(&e);
        assert_eq!(
            quoted,
            "T1 a@x wrote:\nhello\n--------------------------------\n\
             T2 b@x wrote:\nhi back\n--------------------------------\n"
        );
        assert_eq!(quoted.matches(QUOTE_SEPARATOR).count(), 2);
        assert_eq!(quoted.matches(" wrote:\n").count(), 2);
    }

    #[test]
    fn draft_targets_sender_only() {
        let d = reply_draft(&email("a@x", "T1", "Hi", "hello"));
        assert_eq!(d.recipients, "a@x");
        assert_eq!(d.subject, "Re: Hi");
        assert!(d.body.starts_with("T1 a@x wrote:\n"));
    }
}
