/// A company, owned by at most one [`Person`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Company {
    pub name: String,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Empty company, to be populated field by field.
    pub fn blank() -> Self {
        Self::default()
    }
}

/// A person with an optional employer.
///
/// Equality is field-wise; there is no identity beyond the field values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub age: i32,
    pub company: Option<Company>,
}

impl Person {
    /// Fully specified person.
    pub fn new(name: impl Into<String>, age: i32, company: Option<Company>) -> Self {
        Self {
            name: name.into(),
            age,
            company,
        }
    }

    /// Person employed by the named company.
    pub fn employed(name: impl Into<String>, age: i32, company: impl Into<String>) -> Self {
        Self::new(name, age, Some(Company::new(company)))
    }

    /// Empty person (no name, age 0, no company), to be populated by a decoder.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Company name, or an empty string when unemployed.
    pub fn company_name(&self) -> &str {
        self.company.as_ref().map_or("", |c| c.name.as_str())
    }
}
