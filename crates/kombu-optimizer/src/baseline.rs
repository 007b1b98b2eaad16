//! 貪婪分配（比較基準，不作為求解失敗時的替代）

use kombu_core::{Allocation, PatternSet, QuantizedCatalog};

/// 貪婪分配器：依產生順序，每個模式盡量多做
pub struct GreedyAllocator;

impl GreedyAllocator {
    pub fn allocate(patterns: &PatternSet, catalog: &QuantizedCatalog) -> Allocation {
        let mut remaining: Vec<u32> = catalog.stock().to_vec();

        let bags = patterns
            .iter()
            .map(|pattern| {
                let bags = pattern
                    .counts()
                    .iter()
                    .zip(&remaining)
                    .filter(|(&count, _)| count > 0)
                    .map(|(&count, &left)| left / count)
                    .min()
                    .unwrap_or(0);

                for (left, &count) in remaining.iter_mut().zip(pattern.counts()) {
                    *left -= bags * count;
                }
                bags
            })
            .collect();

        Allocation::new(bags)
    }
}
