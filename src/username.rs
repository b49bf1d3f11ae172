//! Login handle derivation.

use crate::account::Account;

/// Lowercase initials of each whitespace-separated token in `owner`.
///
/// ```
/// assert_eq!(bankist::username::derive_username("Hazar Namdar"), "hn");
/// ```
pub fn derive_username(owner: &str) -> String {
    owner
        .split_whitespace()
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Assigns a derived username to every account in place.
pub fn create_usernames(accounts: &mut [Account]) {
    for account in accounts.iter_mut() {
        account.username = derive_username(&account.owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountId;
    use rust_decimal::Decimal;

    #[test]
    fn test_two_word_name() {
        assert_eq!(derive_username("Hazar Namdar"), "hn");
    }

    #[test]
    fn test_non_ascii_initials_are_lowercased() {
        assert_eq!(derive_username("Barış Özgür Yaşar"), "böy");
        assert_eq!(derive_username("Uğur Namdar"), "un");
    }

    #[test]
    fn test_extra_whitespace_is_ignored() {
        assert_eq!(derive_username("  Taylan   Yusuf\tAkgün "), "tya");
    }

    #[test]
    fn test_empty_name_gives_empty_username() {
        assert_eq!(derive_username(""), "");
        assert_eq!(derive_username("   "), "");
    }

    #[test]
    fn test_create_usernames_mutates_all() {
        let mut accounts = vec![
            Account::new(AccountId(1), "Hazar Namdar", vec![], Decimal::ONE, 1),
            Account::new(AccountId(2), "Hans Nobody", vec![], Decimal::ONE, 2),
        ];
        create_usernames(&mut accounts);

        // collisions are allowed
        assert_eq!(accounts[0].username, "hn");
        assert_eq!(accounts[1].username, "hn");
    }
}
