/// Emphasis, strike and highlight delimiters.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: char = '*';
    pub const UNDERSCORE: char = '_';
    pub const STRIKE: char = '~';
    pub const MARK: char = '=';
    /// Longest group one toggle step consumes (`***`).
    pub const MAX_GROUP: usize = 3;

    /// Splits a run of `n` markers into toggle groups.
    ///
    /// Up to three markers are one group. Longer runs toggle a leading group
    /// of three plus `n % 3` more (three when that is zero); whatever is left
    /// after those two groups is literal text.
    pub fn groups(n: usize) -> Vec<usize> {
        match n {
            0 => vec![],
            1..=Self::MAX_GROUP => vec![n],
            _ => {
                let extra = match n % Self::MAX_GROUP {
                    0 => Self::MAX_GROUP,
                    r => r,
                };
                vec![Self::MAX_GROUP, extra]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(1, vec![1])]
    #[case(3, vec![3])]
    #[case(4, vec![3, 1])]
    #[case(5, vec![3, 2])]
    #[case(6, vec![3, 3])]
    #[case(7, vec![3, 1])]
    #[case(8, vec![3, 2])]
    #[case(9, vec![3, 3])]
    fn runs_split_into_primary_and_extra(#[case] n: usize, #[case] expected: Vec<usize>) {
        assert_eq!(Emphasis::groups(n), expected);
    }
}
