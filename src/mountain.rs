use std::collections::{hash_map::Entry, HashMap, HashSet, VecDeque};

use log::debug;

use crate::{Direction, Error, Location};

pub const START_MARKER: char = 'S';
pub const END_MARKER: char = 'E';

const LOWEST_ELEVATION: u8 = 0;
const HIGHEST_ELEVATION: u8 = b'z' - b'a';

fn elevation_of(c: char) -> Option<u8> {
    if c.is_ascii_lowercase() {
        Some(c as u8 - b'a')
    } else {
        None
    }
}

/// Rectangular height map, elevations 0 ('a') to 25 ('z') stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mountain {
    elevations: Vec<u8>,
    row_n: usize,
    col_n: usize,
}

impl Mountain {
    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    pub fn elevation(&self, loc: &Location) -> Option<u8> {
        self.loc_to_ind(loc)
            .and_then(|ind| self.elevations.get(ind))
            .copied()
    }

    pub fn letter(&self, loc: &Location) -> Option<char> {
        self.elevation(loc).map(|e| char::from(b'a' + e))
    }

    /// Only elevations are checked here, adjacency is up to the caller.
    /// Going down is always fine, going up at most one unit.
    pub fn can_step(&self, from: &Location, to: &Location) -> bool {
        match (self.elevation(from), self.elevation(to)) {
            (Some(from_e), Some(to_e)) => to_e <= from_e + 1,
            _ => false,
        }
    }

    pub fn adjacent_locations(&self, loc: &Location) -> impl Iterator<Item = Location> + '_ {
        let from = *loc;
        Direction::all_dirs()
            .iter()
            .filter_map(move |dir| from.neighbor(*dir))
            .filter(move |next| self.can_step(&from, next))
    }

    /// All cells at the lowest elevation, in row-major order.
    pub fn lowest_locations(&self) -> Vec<Location> {
        (0..self.row_n)
            .flat_map(|r| {
                (0..self.col_n).filter_map(move |c| {
                    let loc = Location::new(r, c);
                    if self.elevation(&loc) == Some(LOWEST_ELEVATION) {
                        Some(loc)
                    } else {
                        None
                    }
                })
            })
            .collect()
    }

    /// Number of steps on the shortest climb from `from` to `to`, searched
    /// level by level. `None` if `to` can't be reached.
    pub fn min_steps_n(&self, from: &Location, to: &Location) -> Option<usize> {
        if !self.is_inside(from) || !self.is_inside(to) {
            return None;
        }
        if from == to {
            return Some(0);
        }

        let mut frontier = vec![*from];
        let mut visited = HashSet::from([*from]);
        let mut steps_n = 0;
        while !frontier.is_empty() {
            steps_n += 1;
            let mut next_frontier = Vec::new();
            for cur_loc in &frontier {
                for next_loc in self.adjacent_locations(cur_loc) {
                    if !visited.insert(next_loc) {
                        continue;
                    }
                    if next_loc == *to {
                        debug!(
                            "Reached {} from {} at level {}, {} location(s) visited.",
                            to,
                            from,
                            steps_n,
                            visited.len()
                        );
                        return Some(steps_n);
                    }
                    next_frontier.push(next_loc);
                }
            }
            frontier = next_frontier;
        }

        debug!(
            "Search from {} exhausted after {} level(s) without reaching {}.",
            from, steps_n, to
        );
        None
    }

    /// Shortest path from any of `starts` to `to`, both ends included.
    /// All starts are searched at once, earlier ones win ties.
    pub fn shortest_path(&self, starts: &[Location], to: &Location) -> Option<Vec<Location>> {
        let mut came_from: HashMap<Location, Option<Location>> = HashMap::new();
        let mut search_locations = VecDeque::new();
        for start in starts.iter().filter(|loc| self.is_inside(loc)) {
            if came_from.insert(*start, None).is_none() {
                search_locations.push_back(*start);
            }
        }

        while let Some(cur_loc) = search_locations.pop_front() {
            if cur_loc == *to {
                let path = trace_back(&came_from, cur_loc);
                debug!(
                    "Found path of {} step(s) from {} to {}, {} location(s) visited.",
                    path.len() - 1,
                    path[0],
                    to,
                    came_from.len()
                );
                return Some(path);
            }

            for next_loc in self.adjacent_locations(&cur_loc) {
                if let Entry::Vacant(entry) = came_from.entry(next_loc) {
                    entry.insert(Some(cur_loc));
                    search_locations.push_back(next_loc);
                }
            }
        }

        debug!(
            "Search from {} start(s) exhausted without reaching {}.",
            starts.len(),
            to
        );
        None
    }

    /// Height map lines with every cell off `path` shown as '.'.
    pub fn render_path(&self, path: &[Location]) -> Vec<String> {
        let on_path = path.iter().collect::<HashSet<_>>();
        (0..self.row_n)
            .map(|r| {
                (0..self.col_n)
                    .map(|c| {
                        let loc = Location::new(r, c);
                        if on_path.contains(&loc) {
                            self.letter(&loc).unwrap_or('.')
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn loc_to_ind(&self, loc: &Location) -> Option<usize> {
        if self.is_inside(loc) {
            Some(loc.row() * self.col_n + loc.col())
        } else {
            None
        }
    }

    fn is_inside(&self, loc: &Location) -> bool {
        loc.row() < self.row_n && loc.col() < self.col_n
    }
}

fn trace_back(came_from: &HashMap<Location, Option<Location>>, end: Location) -> Vec<Location> {
    let mut path = vec![end];
    let mut cur_loc = end;
    while let Some(prev_loc) = came_from.get(&cur_loc).copied().flatten() {
        path.push(prev_loc);
        cur_loc = prev_loc;
    }
    path.reverse();

    path
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Survey {
    pub mountain: Mountain,
    pub start: Location,
    pub end: Location,
}

pub struct MountainBuilder {
    elevations: Vec<u8>,
    row_n: usize,
    col_n: Option<usize>,
    start: Option<Location>,
    end: Option<Location>,
}

impl Default for MountainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MountainBuilder {
    pub fn new() -> Self {
        Self {
            elevations: Vec::new(),
            row_n: 0,
            col_n: None,
            start: None,
            end: None,
        }
    }

    /// Leaves the builder untouched when the row is rejected.
    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        let this_col_n = text.chars().count();
        let expect_col_n = self.col_n.unwrap_or(this_col_n);
        if expect_col_n != this_col_n {
            return Err(Error::InconsistentRow(expect_col_n, this_col_n));
        }

        let mut start = self.start;
        let mut end = self.end;
        let mut row = Vec::with_capacity(this_col_n);
        for (c_ind, c) in text.chars().enumerate() {
            let loc = Location::new(self.row_n, c_ind);
            let elevation = match c {
                START_MARKER => {
                    mark(&mut start, START_MARKER, loc)?;
                    LOWEST_ELEVATION
                }
                END_MARKER => {
                    mark(&mut end, END_MARKER, loc)?;
                    HIGHEST_ELEVATION
                }
                _ => elevation_of(c).ok_or(Error::InvalidChar(c))?,
            };
            row.push(elevation);
        }

        self.elevations.extend(row);
        self.col_n = Some(this_col_n);
        self.start = start;
        self.end = end;
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<Survey, Error> {
        let start = self.start.ok_or(Error::MissingMarker(START_MARKER))?;
        let end = self.end.ok_or(Error::MissingMarker(END_MARKER))?;

        Ok(Survey {
            mountain: Mountain {
                elevations: self.elevations,
                row_n: self.row_n,
                col_n: self.col_n.unwrap_or(0),
            },
            start,
            end,
        })
    }
}

fn mark(slot: &mut Option<Location>, marker: char, loc: Location) -> Result<(), Error> {
    match slot {
        Some(first) => Err(Error::DuplicateMarker(marker, *first, loc)),
        None => {
            *slot = Some(loc);
            Ok(())
        }
    }
}
