use std::fmt;

use crate::common::FrequencyMap;
use crate::error::FlightError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopPassenger {
    pub passenger_id: String,
    pub flights: usize,
}

impl fmt::Display for TopPassenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Passenger with the highest number of flights: {}",
            self.passenger_id
        )?;
        write!(f, "Number of flights: {}", self.flights)
    }
}

/// Picks the passenger with the most flights.
///
/// On a tie the entry met first while iterating the map wins; `HashMap`
/// iteration order is unspecified, so which tied id is returned is too.
pub fn top_passenger(counts: &FrequencyMap) -> Result<TopPassenger, FlightError> {
    let (passenger_id, flights) = counts
        .iter()
        .fold(None, |best: Option<(&String, usize)>, (id, &n)| match best {
            Some((_, top)) if top >= n => best,
            _ => Some((id, n)),
        })
        .ok_or(FlightError::EmptyInput)?;

    Ok(TopPassenger {
        passenger_id: passenger_id.clone(),
        flights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(pairs: &[(&str, usize)]) -> FrequencyMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn picks_maximum() {
        let top = top_passenger(&freq(&[("A", 3), ("B", 2), ("C", 1)])).unwrap();
        assert_eq!(
            top,
            TopPassenger {
                passenger_id: "A".to_string(),
                flights: 3
            }
        );
    }

    #[test]
    fn single_entry() {
        let top = top_passenger(&freq(&[("X", 1)])).unwrap();
        assert_eq!((top.passenger_id.as_str(), top.flights), ("X", 1));
    }

    #[test]
    fn result_dominates_every_entry() {
        let counts: FrequencyMap = (0..200)
            .map(|i| (format!("P{i}"), (i * 37) % 101))
            .collect();
        let top = top_passenger(&counts).unwrap();
        assert!(counts.values().all(|&n| top.flights >= n));
        assert_eq!(counts[&top.passenger_id], top.flights);
    }

    #[test]
    fn tie_returns_first_in_iteration_order() {
        let counts = freq(&[("A", 4), ("B", 4), ("C", 1), ("D", 4)]);
        let first_max = counts.iter().find(|(_, n)| **n == 4).map(|(id, _)| id.clone());
        let top = top_passenger(&counts).unwrap();
        assert_eq!(Some(top.passenger_id), first_max);
        assert_eq!(top.flights, 4);
    }

    #[test]
    fn empty_map_is_an_error() {
        let err = top_passenger(&FrequencyMap::new()).unwrap_err();
        assert!(matches!(err, FlightError::EmptyInput));
    }

    #[test]
    fn renders_two_lines() {
        let top = TopPassenger {
            passenger_id: "UES9151GS5".to_string(),
            flights: 25,
        };
        assert_eq!(
            top.to_string(),
            "Passenger with the highest number of flights: UES9151GS5\nNumber of flights: 25"
        );
    }
}
