#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Single-slot notification line: showing a message replaces whatever was there.
#[derive(Debug, Default)]
pub struct Banner {
    current: Option<Notice>,
}

impl Banner {
    pub fn success(&mut self, content: impl Into<String>) {
        self.current = Some(Notice::Success(content.into()));
    }

    pub fn error(&mut self, content: impl Into<String>) {
        self.current = Some(Notice::Error(content.into()));
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showing_one_kind_hides_the_other() {
        let mut b = Banner::default();
        assert_eq!(b.current(), None);

        b.success("Email sent successfully.");
        b.error("Invalid recipient");
        assert_eq!(b.current(), Some(&Notice::Error("Invalid recipient".into())));

        b.success("ok");
        assert_eq!(b.current(), Some(&Notice::Success("ok".into())));
    }
}
