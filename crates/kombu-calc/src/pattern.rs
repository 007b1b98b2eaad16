//! 組合模式產生（深度優先搜尋 + 枝刈り）

use kombu_core::{BagPattern, PackingError, PatternSet, QuantizedCatalog, TargetWindow};

/// 搜尋狀態（每次產生時重新建立，不跨次保留）
struct SearchState {
    /// 目前路徑上各重量的使用枚數（回溯時復原）
    counts: Vec<u32>,
    /// 最重的量化重量
    heaviest: i64,
    found: Vec<BagPattern>,
    nodes_visited: u64,
}

/// 組合模式產生器
pub struct PatternGenerator;

impl PatternGenerator {
    /// 產生所有符合條件的組合模式
    ///
    /// 重量索引以非遞減順序選取，因此每個多重集合只會出現一次，
    /// 且同樣的輸入永遠得到同樣順序的結果。
    pub fn generate(
        catalog: &QuantizedCatalog,
        window: &TargetWindow,
    ) -> kombu_core::Result<PatternSet> {
        let start = catalog.first_in_stock().ok_or(PackingError::EmptyStock)?;
        let heaviest = catalog.heaviest().ok_or(PackingError::EmptyStock)?;

        tracing::debug!(
            "開始產生組合模式：重量 {} 種，每袋 {} 枚，合計 {}..={}",
            catalog.len(),
            window.pieces_per_bag,
            window.min_sum,
            window.max_sum
        );

        let mut state = SearchState {
            counts: vec![0; catalog.len()],
            heaviest,
            found: Vec::new(),
            nodes_visited: 0,
        };

        Self::search(catalog, window, &mut state, start, window.pieces_per_bag, 0);

        tracing::debug!("搜尋節點數: {}", state.nodes_visited);

        if state.found.is_empty() {
            return Err(PackingError::NoFeasiblePattern {
                min_sum: window.min_sum,
                max_sum: window.max_sum,
                pieces_per_bag: window.pieces_per_bag,
            });
        }

        tracing::info!("有效組合模式數: {}", state.found.len());

        Ok(PatternSet::new(state.found))
    }

    fn search(
        catalog: &QuantizedCatalog,
        window: &TargetWindow,
        state: &mut SearchState,
        start: usize,
        picks_left: u32,
        sum_so_far: i64,
    ) {
        state.nodes_visited += 1;

        if picks_left == 0 {
            if window.contains(sum_so_far) {
                state.found.push(BagPattern::new(state.counts.clone()));
            }
            return;
        }

        let weights = catalog.weights();
        let stock = catalog.stock();
        let picks = i64::from(picks_left);

        // 索引只會往後，start 的重量即為剩餘可選的最小值
        let min_w = weights[start];
        if sum_so_far + picks * min_w > window.max_sum {
            return;
        }
        if sum_so_far + picks * state.heaviest < window.min_sum {
            return;
        }

        for idx in start..weights.len() {
            if stock[idx] == 0 || state.counts[idx] >= stock[idx] {
                continue;
            }

            let w = weights[idx];

            // 之後的重量都 >= w，超過上限就不用再看
            if sum_so_far + w + (picks - 1) * w > window.max_sum {
                break;
            }
            if sum_so_far + w + (picks - 1) * state.heaviest < window.min_sum {
                continue;
            }

            state.counts[idx] += 1;
            Self::search(catalog, window, state, idx, picks_left - 1, sum_so_far + w);
            state.counts[idx] -= 1;
        }
    }
}
