// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ops::{BitOr, BitOrAssign};

use num_traits::ToPrimitive;
use serde::de::DeserializeOwned;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::IntoEnumIterator;

/// A barebones bitset over a flag enum, one bit per discriminant.
/// Serialized as the list of member names so decoded metadata stays readable.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct BitEnum<T: ToPrimitive> {
    value: u16,
    phantom: PhantomData<T>,
}

fn bit<T: ToPrimitive>(value: &T) -> u16 {
    value.to_u16().map_or(0, |b| 1 << b)
}

impl<T: ToPrimitive> BitEnum<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: 0,
            phantom: PhantomData,
        }
    }

    #[must_use]
    pub fn to_u16(&self) -> u16 {
        self.value
    }

    #[must_use]
    pub fn from_u16(value: u16) -> Self {
        Self {
            value,
            phantom: PhantomData,
        }
    }

    pub fn new_with(value: T) -> Self {
        let mut s = Self::new();
        s.set(value);
        s
    }

    pub fn set(&mut self, value: T) {
        self.value |= bit(&value);
    }

    pub fn clear(&mut self, value: T) {
        self.value &= !bit(&value);
    }

    pub fn contains(&self, value: T) -> bool {
        self.value & bit(&value) != 0
    }

    pub fn contains_all(&self, values: BitEnum<T>) -> bool {
        values.value & self.value == values.value
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0
    }
}

impl<T: ToPrimitive + IntoEnumIterator + Copy> BitEnum<T> {
    /// The members present, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        T::iter().filter(|f| self.contains(*f))
    }
}

impl<T: ToPrimitive> BitOr for BitEnum<T> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_u16(self.value | rhs.value)
    }
}

impl<T: ToPrimitive> Default for BitEnum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ToPrimitive> BitOrAssign<T> for BitEnum<T> {
    fn bitor_assign(&mut self, rhs: T) {
        self.set(rhs);
    }
}

impl<T: ToPrimitive> BitOr<T> for BitEnum<T> {
    type Output = Self;

    fn bitor(self, rhs: T) -> Self::Output {
        let mut s = self;
        s.set(rhs);
        s
    }
}

impl<T: ToPrimitive> From<T> for BitEnum<T> {
    fn from(value: T) -> Self {
        Self::new_with(value)
    }
}

impl<T: ToPrimitive> FromIterator<T> for BitEnum<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut s = Self::new();
        for flag in iter {
            s.set(flag);
        }
        s
    }
}

impl<T: ToPrimitive + IntoEnumIterator + Copy + Debug> Debug for BitEnum<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: ToPrimitive + IntoEnumIterator + Copy + Serialize> Serialize for BitEnum<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(None)?;
        for flag in self.iter() {
            seq.serialize_element(&flag)?;
        }
        seq.end()
    }
}

impl<'de, T: ToPrimitive + DeserializeOwned> Deserialize<'de> for BitEnum<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let flags = Vec::<T>::deserialize(deserializer)?;
        Ok(flags.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{ClassFlag, FunctionFlag};

    #[test]
    fn test_set_clear_contains() {
        let mut flags = BitEnum::new_with(ClassFlag::Data);
        flags |= ClassFlag::Inner;
        assert!(flags.contains(ClassFlag::Data));
        assert!(flags.contains(ClassFlag::Inner));
        assert!(!flags.contains(ClassFlag::Value));
        flags.clear(ClassFlag::Data);
        assert!(!flags.contains(ClassFlag::Data));
        assert!(flags.contains_all(BitEnum::new_with(ClassFlag::Inner)));
    }

    #[test]
    fn test_iter_follows_declaration_order() {
        let flags = BitEnum::new_with(FunctionFlag::Suspend) | FunctionFlag::Inline;
        assert_eq!(
            flags.iter().collect::<Vec<_>>(),
            vec![FunctionFlag::Inline, FunctionFlag::Suspend]
        );
    }

    #[test]
    fn test_serde_as_names() {
        let flags: BitEnum<FunctionFlag> =
            serde_json::from_str(r#"["operator", "tailrec"]"#).unwrap();
        assert!(flags.contains(FunctionFlag::Operator));
        assert!(flags.contains(FunctionFlag::Tailrec));
        assert_eq!(
            serde_json::to_string(&flags).unwrap(),
            r#"["operator","tailrec"]"#
        );
    }
}
