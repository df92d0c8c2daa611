//! Property-style checks for CPF and CNPJ check digits over many seeded
//! documents.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use backoffice::domain::{DocumentKind, DocumentNumber, compute_check_digits, generate_with, validate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::rstest;

const SAMPLES: u64 = 200;

fn replace_digit(digits: &str, position: usize, replacement: char) -> String {
    digits
        .chars()
        .enumerate()
        .map(|(index, c)| if index == position { replacement } else { c })
        .collect()
}

fn samples(kind: DocumentKind) -> impl Iterator<Item = String> {
    (0..SAMPLES).map(move |seed| generate_with(kind, &mut ChaCha8Rng::seed_from_u64(seed)))
}

#[rstest]
#[case(DocumentKind::Cpf)]
#[case(DocumentKind::Cnpj)]
fn generated_documents_validate(#[case] kind: DocumentKind) {
    for digits in samples(kind) {
        assert_eq!(digits.chars().count(), kind.digit_count());
        assert!(validate(kind, &digits), "{digits} should validate");
        let parsed = DocumentNumber::parse(kind, &digits).expect("generated document parses");
        assert_eq!(
            DocumentNumber::parse_any(&parsed.masked()).expect("masked form parses"),
            parsed
        );
    }
}

#[rstest]
#[case(DocumentKind::Cpf)]
#[case(DocumentKind::Cnpj)]
fn changing_a_check_digit_always_fails(#[case] kind: DocumentKind) {
    let check_positions = [kind.leading_count(), kind.leading_count() + 1];
    for digits in samples(kind) {
        for position in check_positions {
            let original = digits.chars().nth(position).expect("check digit present");
            for replacement in ('0'..='9').filter(|c| *c != original) {
                let mutated = replace_digit(&digits, position, replacement);
                assert!(!validate(kind, &mutated), "{mutated} should not validate");
            }
        }
    }
}

#[rstest]
#[case(DocumentKind::Cpf)]
#[case(DocumentKind::Cnpj)]
fn changing_a_leading_digit_almost_always_fails(#[case] kind: DocumentKind) {
    let mut mutations = 0_u32;
    let mut accepted = 0_u32;
    for digits in samples(kind) {
        for (position, original) in digits.chars().take(kind.leading_count()).enumerate() {
            for replacement in ('0'..='9').filter(|c| *c != original) {
                mutations += 1;
                if validate(kind, &replace_digit(&digits, position, replacement)) {
                    accepted += 1;
                }
            }
        }
    }
    // Both check digits fold two mod-11 remainders onto zero, so a few
    // leading-digit edits keep the same pair.
    assert!(
        accepted * 100 <= mutations,
        "{accepted} of {mutations} mutated documents still validated"
    );
}

#[rstest]
#[case("70499962206", "80499962206")]
#[case("82883607508", "72883607508")]
fn cpf_remainder_folding_lets_some_first_digit_edits_through(
    #[case] original: &str,
    #[case] mutated: &str,
) {
    assert!(validate(DocumentKind::Cpf, original));
    assert!(validate(DocumentKind::Cpf, mutated));
}

#[rstest]
#[case(DocumentKind::Cpf)]
#[case(DocumentKind::Cnpj)]
fn check_digits_are_recomputed_from_the_leading_digits(#[case] kind: DocumentKind) {
    for digits in samples(kind) {
        let leading: String = digits.chars().take(kind.leading_count()).collect();
        let [first, second] = compute_check_digits(kind, &leading).expect("leading digits fit");
        assert_eq!(format!("{leading}{first}{second}"), digits);
    }
}
