use crate::geo::haversine_km;
use crate::model::OrderedStop;

/// Greedy nearest-neighbor tour over already-placed stops.
///
/// The tour is anchored at whatever occupies position 0 of the placed list,
/// which is the first input task rather than a guaranteed fixed-location
/// anchor. Every stop is visited exactly once; each step appends the
/// unvisited stop closest to the current path end, earliest index winning
/// ties. Not globally optimal.
pub fn nearest_neighbor_order(stops: &[OrderedStop]) -> Vec<OrderedStop> {
    if stops.len() <= 2 {
        return stops.to_vec();
    }

    let mut current = 0usize;
    let mut route = vec![current];
    let mut remaining: Vec<usize> = (1..stops.len()).collect();

    while !remaining.is_empty() {
        let last = stops[current].place.location;
        let mut best_pos = 0;
        let mut best_dist = f64::INFINITY;
        for (pos, &idx) in remaining.iter().enumerate() {
            let dist = haversine_km(last, stops[idx].place.location);
            if dist < best_dist {
                best_dist = dist;
                best_pos = pos;
            }
        }
        current = remaining.remove(best_pos);
        route.push(current);
    }

    route.into_iter().map(|i| stops[i].clone()).collect()
}
