//! Round-robin pairings within one group.

/// Every unordered pair of distinct entries, each exactly once.
///
/// Order is nested ascending index: (0,1), (0,2), .., (0,n-1), (1,2), ... Venue and time
/// assignment follow this order, so it must stay stable.
pub fn round_robin_pairings<T>(teams: &[T]) -> impl Iterator<Item = (&T, &T)> + '_ {
    teams
        .iter()
        .enumerate()
        .flat_map(move |(i, a)| teams[i + 1..].iter().map(move |b| (a, b)))
}
