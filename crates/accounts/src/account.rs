//! The monetary account aggregate.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use moneta_core::{AccountId, Entity, LedgerError, LedgerResult, OwnerId};
use moneta_money::{Currency, Money};

/// Aggregate root: a monetary account.
///
/// The account exclusively owns its balance; nothing else mutates it. The
/// balance currency is fixed for the account's lifetime - a new currency means
/// a new account. Deactivation is a soft flag with no balance side effect;
/// whether an inactive account may transact is the orchestrating caller's
/// policy, not the aggregate's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    account_number: String,
    owner_id: OwnerId,
    balance: Money,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    /// Open an account with a zero balance in the given currency.
    pub fn open(owner_id: OwnerId, currency: Currency) -> Self {
        Self::open_with_balance(owner_id, Money::zero(currency))
    }

    /// Open an account with an explicit initial balance.
    pub fn open_with_balance(owner_id: OwnerId, balance: Money) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            account_number: generate_account_number(),
            owner_id,
            balance,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_typed(&self) -> AccountId {
        self.id
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn currency(&self) -> Currency {
        self.balance.currency()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Credit the account. The amount must be positive and in the account's
    /// currency. There is no upper bound on the balance.
    pub fn credit(&mut self, amount: &Money) -> LedgerResult<()> {
        self.ensure_account_currency(amount)?;
        ensure_positive(amount)?;
        self.balance = self.balance.add(amount)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Debit the account. Fails with `InsufficientFunds` when the balance is
    /// lower than the amount, leaving the balance untouched.
    pub fn debit(&mut self, amount: &Money) -> LedgerResult<()> {
        self.ensure_account_currency(amount)?;
        ensure_positive(amount)?;
        if !self.has_sufficient_funds(amount) {
            return Err(LedgerError::insufficient_funds(format!(
                "available {}, required {}",
                self.balance, amount
            )));
        }
        self.balance = self.balance.subtract(amount)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether the balance covers the given amount.
    ///
    /// Pure predicate; an amount in a foreign currency is never covered.
    pub fn has_sufficient_funds(&self, amount: &Money) -> bool {
        self.balance.is_greater_or_equal(amount).unwrap_or(false)
    }

    /// Flag flip only; the balance is untouched.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Flag flip only; the balance is untouched.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    fn ensure_account_currency(&self, amount: &Money) -> LedgerResult<()> {
        if amount.currency() != self.currency() {
            return Err(LedgerError::currency_mismatch(format!(
                "amount is {}, account {} holds {}",
                amount.currency(),
                self.account_number,
                self.currency()
            )));
        }
        Ok(())
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn ensure_positive(amount: &Money) -> LedgerResult<()> {
    if !amount.is_positive() {
        return Err(LedgerError::invalid_amount(format!(
            "amount must be positive, got {amount}"
        )));
    }
    Ok(())
}

/// Millisecond timestamp prefix plus a random 4-digit suffix.
///
/// Collision-resistant in practice and stable once assigned; uniqueness is
/// ultimately enforced by the account store.
fn generate_account_number() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("ACC{}{:04}", Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn eur(amount: &str) -> Money {
        Money::of(amount, Currency::Eur).unwrap()
    }

    fn eur_account(balance: &str) -> Account {
        Account::open_with_balance(OwnerId::new(), eur(balance))
    }

    #[test]
    fn opens_with_zero_balance_and_active() {
        let account = Account::open(OwnerId::new(), Currency::Usd);
        assert!(account.balance().is_zero());
        assert_eq!(account.currency(), Currency::Usd);
        assert!(account.is_active());
        assert!(account.account_number().starts_with("ACC"));
    }

    #[test]
    fn credit_adds_and_touches_updated_at() {
        let mut account = eur_account("10.00");
        let before = account.updated_at();
        account.credit(&eur("5.50")).unwrap();
        assert_eq!(account.balance(), eur("15.50"));
        assert!(account.updated_at() >= before);
    }

    #[test]
    fn debit_below_balance_fails_and_leaves_balance_unchanged() {
        let mut account = eur_account("10.00");
        let err = account.debit(&eur("25.00")).unwrap_err();
        assert_eq!(err.code(), "insufficient_funds");
        assert_eq!(account.balance(), eur("10.00"));
    }

    #[test]
    fn foreign_currency_amounts_are_rejected() {
        let mut account = eur_account("10.00");
        let usd = Money::of("1.00", Currency::Usd).unwrap();
        assert_eq!(account.credit(&usd).unwrap_err().code(), "currency_mismatch");
        assert_eq!(account.debit(&usd).unwrap_err().code(), "currency_mismatch");
        assert!(!account.has_sufficient_funds(&usd));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let mut account = eur_account("10.00");
        assert_eq!(
            account.credit(&Money::zero(Currency::Eur)).unwrap_err().code(),
            "invalid_amount"
        );
        assert_eq!(account.debit(&eur("-1.00")).unwrap_err().code(), "invalid_amount");
        assert_eq!(account.balance(), eur("10.00"));
    }

    #[test]
    fn sufficient_funds_boundary() {
        let account = eur_account("10.00");
        assert!(account.has_sufficient_funds(&eur("10.00")));
        assert!(!account.has_sufficient_funds(&eur("10.01")));
    }

    #[test]
    fn activation_toggles_flag_without_balance_side_effect() {
        let mut account = eur_account("42.00");
        account.deactivate();
        assert!(!account.is_active());
        assert_eq!(account.balance(), eur("42.00"));
        account.activate();
        assert!(account.is_active());
    }

    proptest! {
        /// credit then debit of the same amount restores the original balance.
        #[test]
        fn credit_debit_round_trips(
            opening in 0i64..1_000_000_00i64,
            amount in 1i64..1_000_000_00i64,
        ) {
            let opening = Money::new(Decimal::new(opening, 2), Currency::Eur);
            let amount = Money::new(Decimal::new(amount, 2), Currency::Eur);
            let mut account = Account::open_with_balance(OwnerId::new(), opening);

            account.credit(&amount).unwrap();
            account.debit(&amount).unwrap();
            prop_assert_eq!(account.balance(), opening);
        }

        /// a debit larger than the balance never succeeds.
        #[test]
        fn overdraft_never_succeeds(
            opening in 0i64..1_000_00i64,
            extra in 1i64..1_000_00i64,
        ) {
            let opening = Money::new(Decimal::new(opening, 2), Currency::Eur);
            let over = opening.add(&Money::new(Decimal::new(extra, 2), Currency::Eur)).unwrap();
            let mut account = Account::open_with_balance(OwnerId::new(), opening);

            prop_assert!(account.debit(&over).is_err());
            prop_assert_eq!(account.balance(), opening);
        }
    }

    #[test]
    fn debit_at_exact_balance_succeeds() {
        let mut account = eur_account("10.00");
        account.debit(&eur("10.00")).unwrap();
        assert!(account.balance().is_zero());
        assert_eq!(account.balance(), Money::new(dec!(0), Currency::Eur));
    }
}
