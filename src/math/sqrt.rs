//! Integer square root rounded up.

use primitive_types::U256;

/// Returns the unique `r` with `(r − 1)² < n ≤ r²`.
///
/// Used to locate the midpoint of the curve between the y- and z-branch
/// extremes; rounding up keeps the midpoint on the pool's side.
///
/// # Examples
///
/// ```
/// use primitive_types::U256;
/// use tenor_amm::math::sqrt_up;
///
/// assert_eq!(sqrt_up(U256::from(16u64)), U256::from(4u64));
/// assert_eq!(sqrt_up(U256::from(17u64)), U256::from(5u64));
/// ```
#[must_use]
pub fn sqrt_up(n: U256) -> U256 {
    let r = n.integer_sqrt();
    // r <= 2^128 - 1, so r * r cannot overflow 256 bits.
    if r * r < n {
        r + U256::one()
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(v: u128) -> U256 {
        U256::from(v)
    }

    #[test]
    fn small_values() {
        assert_eq!(sqrt_up(u(0)), u(0));
        assert_eq!(sqrt_up(u(1)), u(1));
        assert_eq!(sqrt_up(u(2)), u(2));
        assert_eq!(sqrt_up(u(4)), u(2));
        assert_eq!(sqrt_up(u(5)), u(3));
    }

    #[test]
    fn defining_property_holds() {
        for n in [3u128, 99, 100, 101, 65_535, 1 << 40, (1 << 64) + 7, u128::MAX] {
            let r = sqrt_up(u(n));
            assert!(r * r >= u(n), "n = {n}");
            let prev = r - U256::one();
            assert!(prev * prev < u(n), "n = {n}");
        }
    }

    #[test]
    fn max_input() {
        let r = sqrt_up(U256::MAX);
        assert_eq!(r, U256::one() << 128usize);
    }
}
