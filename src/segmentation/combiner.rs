/*!
 * Greedy size-bounded packing of adjacent blocks.
 */

use super::model::{Block, BlockOrigin};

/// Pack adjacent `blocks` of one passage into runs no longer than `limit`.
///
/// A block already longer than `limit` is emitted alone, without merging
/// into its neighbours. A single input block passes through untouched.
pub fn combine_by_size<'a>(body: &'a str, blocks: Vec<Block<'a>>, limit: usize) -> Vec<Block<'a>> {
    if blocks.len() <= 1 {
        return blocks;
    }

    let mut packed = Vec::with_capacity(blocks.len());
    let mut current: Option<Block<'a>> = None;

    for block in blocks {
        if block.len() > limit {
            if let Some(run) = current.take() {
                packed.push(run);
            }
            packed.push(block);
            continue;
        }

        current = match current.take() {
            Some(run) if run.len() + block.len() <= limit => {
                Some(Block::new(body, run.start, block.end, BlockOrigin::Run))
            }
            Some(run) => {
                packed.push(run);
                Some(block)
            }
            None => Some(block),
        };
    }

    if let Some(run) = current {
        packed.push(run);
    }

    packed
}
