//! Brazilian taxpayer document numbers (CPF and CNPJ).
//!
//! Both document kinds end in two check digits derived from the leading
//! digits with a weighted mod-11 reduction. This module owns the arithmetic
//! in both directions: computing check digits for generation and
//! recomputing them for validation. No third-party validator is involved.
//!
//! Three layers are exposed:
//! - [`compute_check_digits`] is the raw arithmetic. Passing leading digits
//!   of the wrong shape is a caller bug and yields a
//!   [`CheckDigitContractError`], never a "document invalid" answer.
//! - [`validate`] is the total checksum predicate used by every write flow.
//!   It never fails; malformed input simply returns `false`.
//! - [`DocumentNumber::parse`] is the registration-facing constructor. It
//!   accepts masked input, explains rejections through
//!   [`DocumentValidationError`], and additionally refuses single-digit
//!   repetitions such as `00000000000`.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Weights applied to the 12 leading CNPJ digits for the first check digit.
const CNPJ_WEIGHTS_FIRST: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Weights applied to the 13 CNPJ digits (leading + first check digit).
const CNPJ_WEIGHTS_SECOND: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Mask punctuation tolerated by [`DocumentNumber::parse`].
const MASK_CHARACTERS: [char; 4] = ['.', '-', '/', ' '];

/// Kind of taxpayer document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Cadastro de Pessoas Físicas: individuals, 11 digits.
    #[serde(rename = "CPF", alias = "cpf")]
    Cpf,
    /// Cadastro Nacional da Pessoa Jurídica: companies, 14 digits.
    #[serde(rename = "CNPJ", alias = "cnpj")]
    Cnpj,
}

impl DocumentKind {
    /// Total number of digits, check digits included.
    #[must_use]
    pub const fn digit_count(self) -> usize {
        match self {
            Self::Cpf => 11,
            Self::Cnpj => 14,
        }
    }

    /// Number of digits preceding the two check digits.
    #[must_use]
    pub const fn leading_count(self) -> usize {
        self.digit_count() - 2
    }

    /// Infer the kind from an unmasked digit count.
    ///
    /// # Examples
    /// ```
    /// use backoffice::domain::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::detect("529.982.247-25"), Some(DocumentKind::Cpf));
    /// assert_eq!(DocumentKind::detect("11222333000181"), Some(DocumentKind::Cnpj));
    /// assert_eq!(DocumentKind::detect("123"), None);
    /// ```
    #[must_use]
    pub fn detect(raw: &str) -> Option<Self> {
        match strip_mask(raw).chars().count() {
            11 => Some(Self::Cpf),
            14 => Some(Self::Cnpj),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpf => f.write_str("CPF"),
            Self::Cnpj => f.write_str("CNPJ"),
        }
    }
}

/// Precondition violations of [`compute_check_digits`].
///
/// These indicate a programming error in the caller rather than an invalid
/// document supplied by a user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckDigitContractError {
    /// The leading digit count does not match the document kind.
    #[error("{kind} check digits need {expected} leading digits, got {actual}")]
    WrongLength {
        /// Document kind requested.
        kind: DocumentKind,
        /// Leading digit count the kind requires.
        expected: usize,
        /// Character count supplied.
        actual: usize,
    },
    /// A leading character is not an ASCII digit.
    #[error("leading digits must be ASCII digits; found {character:?} at position {position}")]
    NonDigit {
        /// Zero-based character position.
        position: usize,
        /// Offending character.
        character: char,
    },
}

/// Reasons a submitted document number is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentValidationError {
    /// The unmasked input does not have the kind's digit count.
    #[error("{kind} must have {expected} digits, got {actual}")]
    WrongLength {
        /// Declared document kind.
        kind: DocumentKind,
        /// Digit count the kind requires.
        expected: usize,
        /// Character count after removing the mask.
        actual: usize,
    },
    /// The input length matches neither CPF nor CNPJ.
    #[error("document must have 11 (CPF) or 14 (CNPJ) digits, got {actual}")]
    UnknownKind {
        /// Character count after removing the mask.
        actual: usize,
    },
    /// A character other than a digit or mask punctuation was found.
    #[error("document contains a non-digit character {character:?}")]
    NonDigit {
        /// Offending character.
        character: char,
    },
    /// Every digit is the same; such sequences are never issued.
    #[error("{kind} must not repeat a single digit")]
    RepeatedDigits {
        /// Declared document kind.
        kind: DocumentKind,
    },
    /// The trailing check digits do not match the computed ones.
    #[error("{kind} check digits do not match")]
    ChecksumMismatch {
        /// Declared document kind.
        kind: DocumentKind,
    },
}

/// Compute the two check digits for `leading`.
///
/// # Errors
///
/// Returns [`CheckDigitContractError`] when `leading` is not exactly
/// [`DocumentKind::leading_count`] ASCII digits.
///
/// # Examples
/// ```
/// use backoffice::domain::{DocumentKind, compute_check_digits};
///
/// let digits = compute_check_digits(DocumentKind::Cpf, "496433352").expect("nine digits");
/// assert_eq!(digits, [3, 2]);
/// ```
pub fn compute_check_digits(
    kind: DocumentKind,
    leading: &str,
) -> Result<[u8; 2], CheckDigitContractError> {
    let actual = leading.chars().count();
    if actual != kind.leading_count() {
        return Err(CheckDigitContractError::WrongLength {
            kind,
            expected: kind.leading_count(),
            actual,
        });
    }
    let values = leading
        .chars()
        .enumerate()
        .map(|(position, character)| {
            digit_value(character).ok_or(CheckDigitContractError::NonDigit {
                position,
                character,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(check_digits_for(kind, &values))
}

/// Return `true` when `digits` is a checksum-valid document of `kind`.
///
/// Input must be unmasked. Wrong length or any non-digit character yields
/// `false` without computing anything.
///
/// # Examples
/// ```
/// use backoffice::domain::{DocumentKind, validate};
///
/// assert!(validate(DocumentKind::Cpf, "49643335232"));
/// assert!(!validate(DocumentKind::Cpf, "49643335233"));
/// assert!(!validate(DocumentKind::Cnpj, "49643335232"));
/// ```
#[must_use]
pub fn validate(kind: DocumentKind, digits: &str) -> bool {
    if digits.chars().count() != kind.digit_count() {
        return false;
    }
    let Some(values) = digits.chars().map(digit_value).collect::<Option<Vec<_>>>() else {
        return false;
    };
    let (leading, supplied) = values.split_at(kind.leading_count());
    check_digits_for(kind, leading).as_slice() == supplied
}

/// Generate a random, checksum-valid document using the thread RNG.
///
/// Only seeding flows should call this.
#[must_use]
pub fn generate(kind: DocumentKind) -> String {
    generate_with(kind, &mut rand::rng())
}

/// Generate a checksum-valid document from the supplied RNG.
///
/// Single-digit repetitions are redrawn so that the result is also accepted
/// by [`DocumentNumber::parse`].
pub fn generate_with<R: Rng + ?Sized>(kind: DocumentKind, rng: &mut R) -> String {
    loop {
        let leading: Vec<u8> = (0..kind.leading_count())
            .map(|_| rng.random_range(0..10))
            .collect();
        if is_single_repeated_digit(&leading) {
            continue;
        }
        let check = check_digits_for(kind, &leading);
        return leading
            .iter()
            .chain(check.iter())
            .map(|value| char::from(b'0' + value))
            .collect();
    }
}

/// A validated CPF or CNPJ.
///
/// ## Invariants
/// - `digits` holds exactly [`DocumentKind::digit_count`] ASCII digits.
/// - The trailing two digits are the computed check digits.
/// - The digits are not a single repeated digit.
///
/// Serialises as `{"kind": "CPF", "digits": "52998224725"}` and
/// re-validates on deserialisation.
///
/// # Examples
/// ```
/// use backoffice::domain::{DocumentKind, DocumentNumber};
///
/// let cpf = DocumentNumber::parse(DocumentKind::Cpf, "529.982.247-25").expect("valid CPF");
/// assert_eq!(cpf.digits(), "52998224725");
/// assert_eq!(cpf.masked(), "529.982.247-25");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DocumentNumberDto", into = "DocumentNumberDto")]
pub struct DocumentNumber {
    kind: DocumentKind,
    digits: String,
}

impl DocumentNumber {
    /// Parse a possibly masked document of a declared kind.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentValidationError`] describing the first failed rule.
    pub fn parse(kind: DocumentKind, raw: &str) -> Result<Self, DocumentValidationError> {
        let digits = strip_mask(raw);
        if let Some(character) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(DocumentValidationError::NonDigit { character });
        }
        let actual = digits.chars().count();
        if actual != kind.digit_count() {
            return Err(DocumentValidationError::WrongLength {
                kind,
                expected: kind.digit_count(),
                actual,
            });
        }
        if is_single_repeated_digit(digits.as_bytes()) {
            return Err(DocumentValidationError::RepeatedDigits { kind });
        }
        if !validate(kind, &digits) {
            return Err(DocumentValidationError::ChecksumMismatch { kind });
        }
        Ok(Self { kind, digits })
    }

    /// Parse a document whose kind is inferred from its digit count.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentValidationError::UnknownKind`] when the length fits
    /// neither kind, otherwise any error from [`DocumentNumber::parse`].
    pub fn parse_any(raw: &str) -> Result<Self, DocumentValidationError> {
        let kind = DocumentKind::detect(raw).ok_or_else(|| DocumentValidationError::UnknownKind {
            actual: strip_mask(raw).chars().count(),
        })?;
        Self::parse(kind, raw)
    }

    /// Document kind.
    #[must_use]
    pub const fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Unmasked digits.
    #[must_use]
    pub fn digits(&self) -> &str {
        self.digits.as_str()
    }

    /// Canonical display mask (`000.000.000-00` or `00.000.000/0000-00`).
    #[must_use]
    pub fn masked(&self) -> String {
        let separators: &[(usize, char)] = match self.kind {
            DocumentKind::Cpf => &[(3, '.'), (6, '.'), (9, '-')],
            DocumentKind::Cnpj => &[(2, '.'), (5, '.'), (8, '/'), (12, '-')],
        };
        let mut masked = String::with_capacity(self.digits.len() + separators.len());
        for (index, digit) in self.digits.chars().enumerate() {
            if let Some((_, separator)) = separators.iter().find(|(at, _)| *at == index) {
                masked.push(*separator);
            }
            masked.push(digit);
        }
        masked
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentNumberDto {
    kind: DocumentKind,
    digits: String,
}

impl From<DocumentNumber> for DocumentNumberDto {
    fn from(value: DocumentNumber) -> Self {
        Self {
            kind: value.kind,
            digits: value.digits,
        }
    }
}

impl TryFrom<DocumentNumberDto> for DocumentNumber {
    type Error = DocumentValidationError;

    fn try_from(value: DocumentNumberDto) -> Result<Self, Self::Error> {
        Self::parse(value.kind, &value.digits)
    }
}

fn strip_mask(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !MASK_CHARACTERS.contains(c))
        .collect()
}

fn digit_value(character: char) -> Option<u8> {
    character
        .to_digit(10)
        .filter(|_| character.is_ascii_digit())
        .and_then(|value| u8::try_from(value).ok())
}

fn is_single_repeated_digit<T: PartialEq>(values: &[T]) -> bool {
    values.windows(2).all(|pair| match pair {
        [a, b] => a == b,
        _ => true,
    })
}

fn weighted_sum(values: &[u8], weights: impl IntoIterator<Item = u32>) -> u32 {
    values
        .iter()
        .zip(weights)
        .map(|(value, weight)| u32::from(*value) * weight)
        .sum()
}

/// Check digits for exactly `kind.leading_count()` digit values.
fn check_digits_for(kind: DocumentKind, leading: &[u8]) -> [u8; 2] {
    let mut extended = leading.to_vec();
    match kind {
        DocumentKind::Cpf => {
            let first = cpf_digit(weighted_sum(&extended, (2..=10).rev()));
            extended.push(first);
            let second = cpf_digit(weighted_sum(&extended, (2..=11).rev()));
            [first, second]
        }
        DocumentKind::Cnpj => {
            let first = cnpj_digit(weighted_sum(&extended, CNPJ_WEIGHTS_FIRST));
            extended.push(first);
            let second = cnpj_digit(weighted_sum(&extended, CNPJ_WEIGHTS_SECOND));
            [first, second]
        }
    }
}

/// `(sum * 10) mod 11 mod 10`.
fn cpf_digit(sum: u32) -> u8 {
    narrow_digit((sum * 10).rem_euclid(11).rem_euclid(10))
}

/// `0` when `sum mod 11 < 2`, otherwise `11 - sum mod 11`.
fn cnpj_digit(sum: u32) -> u8 {
    let remainder = sum.rem_euclid(11);
    if remainder < 2 {
        0
    } else {
        narrow_digit(11 - remainder)
    }
}

fn narrow_digit(value: u32) -> u8 {
    // Callers reduce modulo 11 first, so the value always fits.
    u8::try_from(value).unwrap_or(0)
}
