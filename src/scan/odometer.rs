/// 混合进制计数器：每一位是有序字母表的下标，最高位在最左。
/// 逐次 `step` 即按字典序枚举笛卡尔积。
///
/// `fixed` 个前导位在构造后保持不变，用于把搜索空间切成按前缀划分的分区；
/// 进位越过固定前缀即视为该分区枚举完毕。
#[derive(Debug, Clone)]
pub struct Odometer {
    digits: Vec<usize>,
    radix: usize,
    fixed: usize,
    done: bool,
}

impl Odometer {
    pub fn new(len: usize, radix: usize) -> Self {
        Self::with_prefix(len, radix, &[])
    }

    /// 只枚举以 `prefix` 开头的序列
    pub fn with_prefix(len: usize, radix: usize, prefix: &[usize]) -> Self {
        let mut digits = vec![0usize; len];
        digits[..prefix.len()].copy_from_slice(prefix);
        let done = len == 0 || radix == 0 || prefix.iter().any(|&d| d >= radix);
        Self { digits, radix, fixed: prefix.len(), done }
    }

    /// 当前序列；枚举结束后返回 None
    #[inline]
    pub fn current(&self) -> Option<&[usize]> {
        if self.done {
            None
        } else {
            Some(&self.digits)
        }
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.done
    }

    /// 前进到字典序的下一个序列
    #[inline]
    pub fn step(&mut self) {
        let last = self.digits.len() - 1;
        self.bump(last);
    }

    /// 第 `pos` 位加一并清零其后所有位，
    /// 即跳过所有以 `digits[..=pos]` 为前缀的剩余序列。
    pub fn bump(&mut self, pos: usize) {
        if self.done {
            return;
        }
        if pos < self.fixed {
            self.done = true;
            return;
        }
        for d in &mut self.digits[pos + 1..] {
            *d = 0;
        }
        let mut i = pos;
        loop {
            self.digits[i] += 1;
            if self.digits[i] < self.radix {
                return;
            }
            self.digits[i] = 0;
            if i == self.fixed {
                self.done = true;
                return;
            }
            i -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_all(mut odo: Odometer) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        while let Some(d) = odo.current() {
            out.push(d.to_vec());
            odo.step();
        }
        out
    }

    #[test]
    fn enumerates_full_product_in_lex_order() {
        let all = collect_all(Odometer::new(3, 3));
        assert_eq!(all.len(), 27);
        assert_eq!(all[0], vec![0, 0, 0]);
        assert_eq!(all[1], vec![0, 0, 1]);
        assert_eq!(all[3], vec![0, 1, 0]);
        assert_eq!(all[26], vec![2, 2, 2]);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn single_position() {
        let all = collect_all(Odometer::new(1, 4));
        assert_eq!(all, vec![vec![0], vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn bump_skips_whole_prefix() {
        let mut odo = Odometer::new(4, 3);
        // [0,0,0,0] -> 跳过前缀 [0,0,0]
        odo.bump(2);
        assert_eq!(odo.current(), Some(&[0, 0, 1, 0][..]));
        odo.bump(0);
        assert_eq!(odo.current(), Some(&[1, 0, 0, 0][..]));
    }

    #[test]
    fn bump_with_carry_exhausts() {
        let mut odo = Odometer::new(2, 2);
        odo.bump(0);
        assert_eq!(odo.current(), Some(&[1, 0][..]));
        odo.bump(0);
        assert!(odo.is_exhausted());
        assert!(odo.current().is_none());
    }

    #[test]
    fn prefix_partition_stays_inside_prefix() {
        let part = collect_all(Odometer::with_prefix(3, 3, &[1]));
        assert_eq!(part.len(), 9);
        assert!(part.iter().all(|d| d[0] == 1));
        assert_eq!(part.first().unwrap(), &vec![1, 0, 0]);
        assert_eq!(part.last().unwrap(), &vec![1, 2, 2]);

        let mut odo = Odometer::with_prefix(3, 3, &[2]);
        odo.bump(0);
        assert!(odo.is_exhausted());
    }

    #[test]
    fn full_length_prefix_yields_one_sequence() {
        let part = collect_all(Odometer::with_prefix(2, 5, &[3, 4]));
        assert_eq!(part, vec![vec![3, 4]]);
    }

    #[test]
    fn degenerate_inputs_are_exhausted() {
        assert!(Odometer::new(0, 3).is_exhausted());
        assert!(Odometer::new(3, 0).is_exhausted());
        assert!(Odometer::with_prefix(2, 3, &[5]).is_exhausted());
    }
}
