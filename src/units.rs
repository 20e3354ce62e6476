#![allow(missing_docs)]

//! This module defines the unit types used by the optimiser and their conversions.

/// Represents a dimensionless quantity (ratios, percentages as fractions, years of payback).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    derive_more::Add,
    derive_more::Sub,
    derive_more::AddAssign,
    derive_more::SubAssign,
)]
pub struct Dimensionless(pub f64);

impl std::ops::Mul for Dimensionless {
    type Output = Dimensionless;

    fn mul(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless::from(self.0 * rhs.0)
    }
}

impl std::ops::Div for Dimensionless {
    type Output = Dimensionless;

    fn div(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless::from(self.0 / rhs.0)
    }
}

impl From<f64> for Dimensionless {
    fn from(val: f64) -> Self {
        Self(val)
    }
}

impl From<Dimensionless> for f64 {
    fn from(val: Dimensionless) -> Self {
        val.0
    }
}

macro_rules! unit_struct {
    ($name:ident) => {
        /// Represents a type of quantity.
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            PartialOrd,
            derive_more::Add,
            derive_more::Sub,
            derive_more::AddAssign,
            derive_more::SubAssign,
        )]
        pub struct $name(pub f64);

        impl $name {
            /// Creates a new instance of the unit type from a f64 value.
            pub fn from(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as a f64.
            pub fn value(self) -> f64 {
                self.0
            }

            /// Returns the smaller of the two quantities.
            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }

            /// Returns the larger of the two quantities.
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }
        }

        impl std::ops::Mul<Dimensionless> for $name {
            type Output = $name;
            fn mul(self, rhs: Dimensionless) -> $name {
                $name::from(self.0 * rhs.0)
            }
        }

        impl std::ops::Mul<$name> for Dimensionless {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                $name::from(self.0 * rhs.0)
            }
        }

        impl std::ops::Div<Dimensionless> for $name {
            type Output = $name;
            fn div(self, rhs: Dimensionless) -> $name {
                $name::from(self.0 / rhs.0)
            }
        }
    };
}

macro_rules! impl_mul {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Mul<$Rhs> for $Lhs {
            type Output = $Out;
            fn mul(self, rhs: $Rhs) -> $Out {
                <$Out>::from(self.0 * rhs.0)
            }
        }
        impl std::ops::Mul<$Lhs> for $Rhs {
            type Output = $Out;
            fn mul(self, lhs: $Lhs) -> $Out {
                <$Out>::from(self.0 * lhs.0)
            }
        }
    };
}

macro_rules! impl_div {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Div<$Rhs> for $Lhs {
            type Output = $Out;
            fn div(self, rhs: $Rhs) -> $Out {
                <$Out>::from(self.0 / rhs.0)
            }
        }
    };
}

// Base quantities
unit_struct!(Money);
unit_struct!(Energy);
unit_struct!(Capacity);
unit_struct!(Litres);
unit_struct!(Mass);

// Derived quantities
unit_struct!(MoneyPerCapacity);
unit_struct!(EnergyPerCapacity);
unit_struct!(EnergyPerLitre);
unit_struct!(MoneyPerLitre);
unit_struct!(MassPerLitre);
unit_struct!(EnergyPerMoney);

// Division rules
impl_div!(Money, MoneyPerCapacity, Capacity);
impl_div!(Energy, EnergyPerCapacity, Capacity);
impl_div!(Energy, EnergyPerLitre, Litres);
impl_div!(EnergyPerCapacity, MoneyPerCapacity, EnergyPerMoney);
impl_div!(Energy, Energy, Dimensionless);
impl_div!(Money, Money, Dimensionless);

// Multiplication rules
impl_mul!(Capacity, MoneyPerCapacity, Money);
impl_mul!(Capacity, EnergyPerCapacity, Energy);
impl_mul!(Litres, EnergyPerLitre, Energy);
impl_mul!(Litres, MoneyPerLitre, Money);
impl_mul!(Litres, MassPerLitre, Mass);

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_capacity_cost_round_trip() {
        let capacity = Money(9000.0) / MoneyPerCapacity(4500.0);
        assert_approx_eq!(f64, capacity.value(), 2.0);
        assert_approx_eq!(f64, (capacity * MoneyPerCapacity(4500.0)).value(), 9000.0);
    }

    #[test]
    fn test_diesel_energy_content() {
        let energy = Litres(1000.0) * EnergyPerLitre(10.0);
        assert_eq!(energy, Energy(10000.0));
        assert_eq!(energy / EnergyPerLitre(10.0), Litres(1000.0));
    }

    #[test]
    fn test_min_max() {
        assert_eq!(Capacity(1.5).min(Capacity(2.0)), Capacity(1.5));
        assert_eq!(Capacity(2.0).min(Capacity(1.5)), Capacity(1.5));
        assert_eq!(Money(2.0).max(Money(1.5)), Money(2.0));
        assert_eq!(Money(1.5).max(Money(2.0)), Money(2.0));
    }
}
