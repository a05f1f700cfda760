// Returns the greatest common divisor of `a` and `b`.
pub fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

// Trial division. Only called when the capacity changes.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }

    let mut i = 3;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }

    true
}

// Returns the smallest prime greater than or equal to `n`.
pub fn next_prime(mut n: usize) -> usize {
    while !is_prime(n) {
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_values() {
        assert_eq!(gcd(17, 7), 1);
        assert_eq!(gcd(17, 34), 17);
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(5, 0), 5);
        assert_eq!(gcd(0, 5), 5);
    }

    #[test]
    fn primes() {
        let primes = (0..50).filter(|&n| is_prime(n)).collect::<Vec<_>>();
        assert_eq!(
            primes,
            [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]
        );
    }

    #[test]
    fn next_prime_rounds_up() {
        assert_eq!(next_prime(0), 2);
        assert_eq!(next_prime(7), 7);
        assert_eq!(next_prime(8), 11);
        assert_eq!(next_prime(15), 17);
        assert_eq!(next_prime(24), 29);
    }
}
