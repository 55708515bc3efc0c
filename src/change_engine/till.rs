//! Per-problem input state: the virtual till for count mode and the numpad
//! buffer for calculate mode. Both are cleared whenever a new problem starts.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::change_engine::{evaluator::parse_answer_micros, money::Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyKind {
    Bill,
    Coin,
}

impl fmt::Display for CurrencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyKind::Bill => write!(f, "bill"),
            CurrencyKind::Coin => write!(f, "coin"),
        }
    }
}

/// The buttons on the virtual till.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Denomination {
    Hundred,
    Fifty,
    Twenty,
    Ten,
    Five,
    One,
    Quarter,
    Dime,
    Nickel,
    Penny,
}

impl Denomination {
    pub const ALL: [Denomination; 10] = [
        Denomination::Hundred,
        Denomination::Fifty,
        Denomination::Twenty,
        Denomination::Ten,
        Denomination::Five,
        Denomination::One,
        Denomination::Quarter,
        Denomination::Dime,
        Denomination::Nickel,
        Denomination::Penny,
    ];

    pub fn value(self) -> Money {
        match self {
            Denomination::Hundred => Money::from_dollars(100),
            Denomination::Fifty   => Money::from_dollars(50),
            Denomination::Twenty  => Money::from_dollars(20),
            Denomination::Ten     => Money::from_dollars(10),
            Denomination::Five    => Money::from_dollars(5),
            Denomination::One     => Money::from_dollars(1),
            Denomination::Quarter => Money::from_cents(25),
            Denomination::Dime    => Money::from_cents(10),
            Denomination::Nickel  => Money::from_cents(5),
            Denomination::Penny   => Money::from_cents(1),
        }
    }

    pub fn kind(self) -> CurrencyKind {
        if self.value() >= Money::from_dollars(1) {
            CurrencyKind::Bill
        } else {
            CurrencyKind::Coin
        }
    }

    /// Till buttons on offer; the penny goes away when pennies are off.
    pub fn available(penny_enabled: bool) -> impl Iterator<Item = Denomination> {
        Self::ALL
            .into_iter()
            .filter(move |d| penny_enabled || *d != Denomination::Penny)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", currency_label(self.value(), self.kind()))
    }
}

/// `"$5"` for bills, `"25¢"` for coins.
pub fn currency_label(value: Money, kind: CurrencyKind) -> String {
    match kind {
        CurrencyKind::Bill => format!("${}", value.cents() / 100),
        CurrencyKind::Coin => format!("{}¢", value.cents()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldItem {
    pub value: Money,
    pub kind: CurrencyKind,
}

/// Bills and coins the student has placed in the till, in tap order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldCurrency {
    items: Vec<HeldItem>,
}

impl HeldCurrency {
    pub fn push(&mut self, denomination: Denomination) {
        self.items.push(HeldItem { value: denomination.value(), kind: denomination.kind() });
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total(&self) -> Money {
        self.items.iter().map(|i| i.value).sum()
    }

    pub fn items(&self) -> &[HeldItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One numpad press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Digit(u8),
    Point,
    Clear,
}

/// Calculate-mode typed answer, built one key at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    /// Apply a key. A second decimal point and out-of-range digits are ignored.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Clear => self.text.clear(),
            Key::Point if self.text.contains('.') => {}
            Key::Point => self.text.push('.'),
            Key::Digit(d) => {
                if let Some(c) = char::from_digit(u32::from(d), 10) {
                    self.text.push(c);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The typed value rounded to cents for the readout (`"$0.00"` when empty).
    pub fn display(&self) -> String {
        let micros = parse_answer_micros(&self.text);
        let cents = (micros + 5_000).div_euclid(10_000);
        format!("${}", Money::from_cents(cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denominations_are_tagged_by_kind() {
        assert_eq!(Denomination::One.kind(), CurrencyKind::Bill);
        assert_eq!(Denomination::Quarter.kind(), CurrencyKind::Coin);
        assert_eq!(Denomination::Twenty.to_string(), "$20");
        assert_eq!(Denomination::Dime.to_string(), "10¢");
    }

    #[test]
    fn penny_leaves_the_till_when_disabled() {
        assert_eq!(Denomination::available(true).count(), 10);
        let no_penny: Vec<_> = Denomination::available(false).collect();
        assert_eq!(no_penny.len(), 9);
        assert!(!no_penny.contains(&Denomination::Penny));
    }

    #[test]
    fn held_currency_sums_in_cents() {
        let mut held = HeldCurrency::default();
        held.push(Denomination::One);
        held.push(Denomination::One);
        held.push(Denomination::Dime);
        held.push(Denomination::Dime);
        held.push(Denomination::Dime);
        assert_eq!(held.total(), Money::from_cents(230));
        assert_eq!(held.items().len(), 5);
        assert_eq!(held.items()[0].kind, CurrencyKind::Bill);
        held.clear();
        assert!(held.is_empty());
        assert_eq!(held.total(), Money::ZERO);
    }

    #[test]
    fn input_buffer_ignores_second_point() {
        let mut buf = InputBuffer::default();
        for key in [Key::Digit(1), Key::Point, Key::Digit(2), Key::Point, Key::Digit(5)] {
            buf.press(key);
        }
        assert_eq!(buf.as_str(), "1.25");
        assert_eq!(buf.display(), "$1.25");
        buf.press(Key::Digit(42));
        assert_eq!(buf.as_str(), "1.25");
        buf.press(Key::Clear);
        assert_eq!(buf.as_str(), "");
        assert_eq!(buf.display(), "$0.00");
    }

    #[test]
    fn input_display_rounds_to_cents() {
        let mut buf = InputBuffer::default();
        for key in [Key::Point, Key::Digit(1), Key::Digit(2), Key::Digit(5)] {
            buf.press(key);
        }
        assert_eq!(buf.display(), "$0.13");
    }
}
