/// Kind of input, inferred from the `type` attribute or a keyword in the name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
}

/// Borrowed view of a control's attributes at the moment it is validated.
#[derive(Clone, Copy, Debug)]
pub struct Field<'a> {
    name: &'a str,
    input_type: &'a str,
    value: &'a str,
    required: bool,
}

impl<'a> Field<'a> {
    #[must_use]
    pub fn new(name: &'a str, input_type: &'a str, value: &'a str, required: bool) -> Self {
        Self {
            name,
            input_type,
            value,
            required,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[must_use]
    pub fn input_type(&self) -> &'a str {
        self.input_type
    }

    #[must_use]
    pub fn value(&self) -> &'a str {
        self.value
    }

    /// Value with surrounding whitespace and byte-order marks removed;
    /// every rule reads this.
    #[must_use]
    pub fn trimmed_value(&self) -> &'a str {
        self.value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Case-insensitive substring match on the field name. `keyword` must be
    /// lowercase.
    #[must_use]
    pub fn name_contains(&self, keyword: &str) -> bool {
        self.name.to_lowercase().contains(keyword)
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        if self.input_type.eq_ignore_ascii_case("email") || self.name_contains("email") {
            FieldKind::Email
        } else if self.input_type.eq_ignore_ascii_case("password") || self.name_contains("password")
        {
            FieldKind::Password
        } else {
            FieldKind::Text
        }
    }
}
