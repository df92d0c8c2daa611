//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DocumentKind, DocumentNumber, DocumentValidationError, LocationId};

/// Maximum allowed length for a user name.
pub const USER_NAME_MAX: usize = 120;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Name was blank.
    #[error("user name must not be empty")]
    EmptyName,
    /// Name exceeded [`USER_NAME_MAX`] characters.
    #[error("user name must be at most {max} characters")]
    NameTooLong {
        /// Maximum character count.
        max: usize,
    },
    /// The identity document was rejected.
    #[error("invalid document: {0}")]
    Document(#[from] DocumentValidationError),
    /// The declared document type disagrees with the document itself.
    #[error("document type {declared} does not match a {actual} document")]
    DocumentTypeMismatch {
        /// Type submitted alongside the document.
        declared: DocumentKind,
        /// Type of the stored document.
        actual: DocumentKind,
    },
}

/// Numeric user identifier assigned by persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marketplace role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Back-office administrator.
    Admin,
    /// Travel agency selling services.
    Agency,
    /// Supplier operating services (drivers, guides).
    Supplier,
    /// End customer buying services.
    Customer,
}

/// Human readable user name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`]; surrounding whitespace is
    /// trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError`] for blank or overlong names.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: USER_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Marketplace user.
///
/// ## Invariants
/// - `document` is a checksum-valid CPF or CNPJ; `document_type` is derived
///   from it rather than stored separately.
/// - `location_id` is optional here, but a user without one can never be
///   placed on a service roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    name: UserName,
    role: UserRole,
    location_id: Option<LocationId>,
    document: DocumentNumber,
}

impl User {
    /// Build a user from validated parts.
    #[must_use]
    pub const fn new(
        id: UserId,
        name: UserName,
        role: UserRole,
        location_id: Option<LocationId>,
        document: DocumentNumber,
    ) -> Self {
        Self {
            id,
            name,
            role,
            location_id,
            document,
        }
    }

    /// Build a user from a registration form where the document and its
    /// declared type arrive as raw strings.
    ///
    /// When `document_type` is `None` the kind is inferred from the digit
    /// count.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError`] when the name or document is invalid.
    ///
    /// # Examples
    /// ```
    /// use backoffice::domain::{DocumentKind, LocationId, User, UserId, UserRole};
    ///
    /// let user = User::register(
    ///     UserId::new(1),
    ///     "Ana Souza",
    ///     UserRole::Supplier,
    ///     Some(LocationId::new(3)),
    ///     "529.982.247-25",
    ///     Some(DocumentKind::Cpf),
    /// )
    /// .expect("valid registration");
    /// assert_eq!(user.document_type(), DocumentKind::Cpf);
    /// ```
    pub fn register(
        id: UserId,
        name: &str,
        role: UserRole,
        location_id: Option<LocationId>,
        document: &str,
        document_type: Option<DocumentKind>,
    ) -> Result<Self, UserValidationError> {
        let name = UserName::new(name)?;
        let document = match document_type {
            Some(kind) => DocumentNumber::parse(kind, document)?,
            None => DocumentNumber::parse_any(document)?,
        };
        Ok(Self::new(id, name, role, location_id, document))
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// User name.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Marketplace role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Registered location, when any.
    #[must_use]
    pub const fn location_id(&self) -> Option<LocationId> {
        self.location_id
    }

    /// Identity document.
    #[must_use]
    pub const fn document(&self) -> &DocumentNumber {
        &self.document
    }

    /// Document type derived from the stored document.
    #[must_use]
    pub const fn document_type(&self) -> DocumentKind {
        self.document.kind()
    }

    /// Replace the identity document wholesale.
    #[must_use]
    pub fn with_document(mut self, document: DocumentNumber) -> Self {
        self.document = document;
        self
    }

    /// Move the user to another location, or clear it.
    #[must_use]
    pub const fn with_location(mut self, location_id: Option<LocationId>) -> Self {
        self.location_id = location_id;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: UserId,
    name: String,
    role: UserRole,
    #[serde(default)]
    location_id: Option<LocationId>,
    document: DocumentNumber,
    #[serde(default)]
    document_type: Option<DocumentKind>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let document_type = Some(value.document_type());
        Self {
            id: value.id,
            name: value.name.into(),
            role: value.role,
            location_id: value.location_id,
            document: value.document,
            document_type,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let UserDto {
            id,
            name,
            role,
            location_id,
            document,
            document_type,
        } = value;
        if let Some(declared) = document_type.filter(|declared| *declared != document.kind()) {
            return Err(UserValidationError::DocumentTypeMismatch {
                declared,
                actual: document.kind(),
            });
        }
        Ok(Self::new(id, UserName::new(name)?, role, location_id, document))
    }
}
