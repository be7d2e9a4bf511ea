use crate::domain::email::Draft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposeField {
    #[default]
    Recipients,
    Subject,
    Body,
}

impl ComposeField {
    pub const ALL: [ComposeField; 3] = [
        ComposeField::Recipients,
        ComposeField::Subject,
        ComposeField::Body,
    ];

    pub fn next(self) -> Self {
        match self {
            ComposeField::Recipients => ComposeField::Subject,
            ComposeField::Subject => ComposeField::Body,
            ComposeField::Body => ComposeField::Recipients,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ComposeField::Recipients => ComposeField::Body,
            ComposeField::Subject => ComposeField::Recipients,
            ComposeField::Body => ComposeField::Subject,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ComposeField::Recipients => "To",
            ComposeField::Subject => "Subject",
            ComposeField::Body => "Body",
        }
    }
}

#[derive(Debug, Default)]
pub struct ComposeForm {
    pub draft: Draft,
    pub focus: ComposeField,
    /// Set while a send is in flight; further submits are ignored.
    pub sending: bool,
}

impl ComposeForm {
    pub fn new(draft: Draft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    pub fn value(&self, field: ComposeField) -> &str {
        match field {
            ComposeField::Recipients => &self.draft.recipients,
            ComposeField::Subject => &self.draft.subject,
            ComposeField::Body => &self.draft.body,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            ComposeField::Recipients => &mut self.draft.recipients,
            ComposeField::Subject => &mut self.draft.subject,
            ComposeField::Body => &mut self.draft.body,
        }
    }

    pub fn insert(&mut self, ch: char) {
        self.focused_mut().push(ch);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    /// Newline in the body; single-line fields advance instead.
    pub fn enter(&mut self) {
        if self.focus == ComposeField::Body {
            self.insert('\n');
        } else {
            self.focus = self.focus.next();
        }
    }

    /// Hands out the draft to send, or `None` while a previous send is pending.
    pub fn begin_submit(&mut self) -> Option<Draft> {
        if self.sending {
            return None;
        }
        self.sending = true;
        Some(self.draft.clone())
    }

    pub fn finish_submit(&mut self) {
        self.sending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_follows_focus() {
        let mut f = ComposeForm::default();
        for ch in "b@x".chars() {
            f.insert(ch);
        }
        f.enter();
        assert_eq!(f.focus, ComposeField::Subject);
        f.insert('H');
        f.insert('x');
        f.backspace();
        f.insert('i');
        f.enter();
        f.insert('a');
        f.enter();
        f.insert('b');

        assert_eq!(
            f.draft,
            Draft {
                recipients: "b@x".into(),
                subject: "Hi".into(),
                body: "a\nb".into(),
            }
        );
    }

    #[test]
    fn fields_cycle() {
        let mut field = ComposeField::Recipients;
        for _ in 0..ComposeField::ALL.len() {
            field = field.next();
        }
        assert_eq!(field, ComposeField::Recipients);
        assert_eq!(ComposeField::Recipients.prev(), ComposeField::Body);
    }

    #[test]
    fn submit_is_guarded_while_in_flight() {
        let mut f = ComposeForm::new(Draft {
            recipients: "b@x".into(),
            subject: "s".into(),
            body: "b".into(),
        });
        assert!(f.begin_submit().is_some());
        assert!(f.begin_submit().is_none());
        f.finish_submit();
        assert_eq!(f.begin_submit().map(|d| d.recipients), Some("b@x".to_string()));
    }
}
