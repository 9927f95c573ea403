//! Overlap resolution: assign each interval the smallest free lane.
//!
//! Single forward sweep over intervals sorted by start. An interval leaves the
//! active set once its end is at or before the current start, so events that
//! touch end-to-start do not overlap and may share a lane.
//!
//! Every interval in the active set shares one `cluster_lane_count`: the
//! highest active lane plus one, or the largest count an open member already
//! carries if that is higher. Counts only grow, so an open event never widens
//! back over lanes its earlier neighbours were drawn in.
//!
//! The policy follows the contiguous active set rather than computing the
//! chromatic number of the whole interval graph, so sparse overlap chains
//! can be given more columns than strictly necessary.

/// Lane placement for one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneAssignment {
    /// Position of the interval in the input slice.
    pub index: usize,
    pub lane: usize,
    pub cluster_lane_count: usize,
}

/// Assign lanes to `(start, end)` intervals.
///
/// The result is in sweep order: ascending start, ties in input order.
pub fn assign_lanes<T: Ord + Copy>(intervals: &[(T, T)]) -> Vec<LaneAssignment> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    // Stable: equal starts keep their input order.
    order.sort_by_key(|&i| intervals[i].0);

    let mut assignments: Vec<LaneAssignment> = Vec::with_capacity(intervals.len());
    // Positions into `assignments` of intervals still open at the cursor.
    let mut active: Vec<usize> = Vec::new();
    // Lane occupancy table, indexed by lane.
    let mut occupied: Vec<bool> = Vec::new();

    for index in order {
        let start = intervals[index].0;

        active.retain(|&pos| {
            let a = &assignments[pos];
            let open = intervals[a.index].1 > start;
            if !open {
                occupied[a.lane] = false;
            }
            open
        });

        let lane = match occupied.iter().position(|used| !used) {
            Some(free) => {
                occupied[free] = true;
                free
            }
            None => {
                occupied.push(true);
                occupied.len() - 1
            }
        };

        active.push(assignments.len());
        assignments.push(LaneAssignment {
            index,
            lane,
            cluster_lane_count: 0,
        });

        // Highest active lane + 1, never below what an open member already has.
        let count = active
            .iter()
            .map(|&pos| {
                let a = &assignments[pos];
                (a.lane + 1).max(a.cluster_lane_count)
            })
            .max()
            .unwrap_or(1);
        for &pos in &active {
            assignments[pos].cluster_lane_count = count;
        }
    }

    assignments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert!(assign_lanes::<i32>(&[]).is_empty());
    }

    #[test]
    fn reuses_freed_lane_first_fit() {
        // 0: [0,10) lane 0, 1: [0,20) lane 1, 2: [10,30) takes freed lane 0
        let result = assign_lanes(&[(0, 10), (0, 20), (10, 30)]);
        let lanes: Vec<_> = result.iter().map(|a| (a.index, a.lane)).collect();
        assert_eq!(lanes, vec![(0, 0), (1, 1), (2, 0)]);
    }

    #[test]
    fn late_joiner_shares_count_of_open_members() {
        // A long event stays open while a three-wide cluster drains.
        let result = assign_lanes(&[(0, 100), (0, 10), (0, 10), (20, 30)]);
        assert_eq!(result[0].cluster_lane_count, 3);
        // D joins only A (lane 0), lands in lane 1 and takes A's width.
        assert_eq!(result[3].lane, 1);
        assert_eq!(result[3].cluster_lane_count, result[0].cluster_lane_count);
    }
}
