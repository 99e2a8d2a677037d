use integer_sqrt::IntegerSquareRoot;

pub fn integer_squareroot<T: IntegerSquareRoot>(n: T) -> T {
    n.integer_sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_squareroot_rounds_down() {
        assert_eq!(integer_squareroot(3_u64), 1);
        assert_eq!(integer_squareroot(4_u64), 2);
        assert_eq!(integer_squareroot(63_u64), 7);
        assert_eq!(integer_squareroot(64_u64), 8);
    }
}
