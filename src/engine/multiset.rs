// ==========================================
// 分切/印刷机生产配置引擎 - 多重集代数
// ==========================================
// 职责: key → 正计数 的可数多重集, 提供包含/并/差
// 红线: 永不存储 0 计数 (在每个变更操作内部保证)
// 红线: 差运算出现负数即报错, 不截断为 0
// ==========================================

use crate::engine::error::{EngineError, EngineResult};
use serde::Serialize;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt::Debug;

/// 可数多重集
///
/// 以有序映射存储, 迭代与序列化顺序确定。
/// 缺失的 key 视为计数 0。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Multiset<K: Ord> {
    counts: BTreeMap<K, usize>,
}

impl<K: Ord> Default for Multiset<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone + Debug> Multiset<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 统计每个 key 的出现次数
    pub fn build<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut multiset = Self::new();
        for key in keys {
            multiset.insert_n(key, 1);
        }
        multiset
    }

    pub fn singleton(key: K) -> Self {
        Self::build([key])
    }

    /// 增加 n 次; n = 0 时不写入
    pub fn insert_n(&mut self, key: K, n: usize) {
        if n == 0 {
            return;
        }
        *self.counts.entry(key).or_insert(0) += n;
    }

    pub fn count(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// 不同 key 的个数
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// 计数总和
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.counts.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, usize> {
        self.counts.iter()
    }

    /// self ⊆ other: self 中每个 key 在 other 中的计数都不小于 self
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.counts
            .iter()
            .all(|(key, count)| other.count(key) >= *count)
    }

    /// 逐 key 求和
    pub fn union(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (key, count) in &other.counts {
            result.insert_n(key.clone(), *count);
        }
        result
    }

    /// 逐 key 相减; 任一计数将为负时返回 InvalidOperation
    pub fn difference(&self, other: &Self) -> EngineResult<Self> {
        let mut result = self.clone();
        for (key, removed) in &other.counts {
            let present = result.count(key);
            if *removed > present {
                return Err(EngineError::InvalidOperation {
                    key: format!("{:?}", key),
                    present,
                    removed: *removed,
                });
            }
            if *removed == present {
                result.counts.remove(key);
            } else if let Some(count) = result.counts.get_mut(key) {
                *count -= removed;
            }
        }
        Ok(result)
    }
}

impl<K: Ord + Clone + Debug> FromIterator<K> for Multiset<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::build(iter)
    }
}

impl<'a, K: Ord> IntoIterator for &'a Multiset<K> {
    type Item = (&'a K, &'a usize);
    type IntoIter = btree_map::Iter<'a, K, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

// ==========================================
// 自由函数形式 (与外部接口命名一致)
// ==========================================

/// a ⊆ b
pub fn contains<K: Ord + Clone + Debug>(a: &Multiset<K>, b: &Multiset<K>) -> bool {
    a.is_subset_of(b)
}

pub fn union<K: Ord + Clone + Debug>(a: &Multiset<K>, b: &Multiset<K>) -> Multiset<K> {
    a.union(b)
}

pub fn difference<K: Ord + Clone + Debug>(
    a: &Multiset<K>,
    b: &Multiset<K>,
) -> EngineResult<Multiset<K>> {
    a.difference(b)
}
