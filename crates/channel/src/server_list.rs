// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered `host:port` endpoint list with same-server re-selection detection.

use rand::Rng;

#[derive(Debug, Default)]
pub struct ServerList {
    endpoints: Vec<String>,
    last_selected: Option<usize>,
}

impl ServerList {
    pub fn new(endpoints: Vec<String>) -> Self {
        Self { endpoints, last_selected: None }
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.endpoints.first().map(String::as_str)
    }

    pub fn endpoint_at(&self, index: usize) -> Option<&str> {
        self.endpoints.get(index).map(String::as_str)
    }

    pub fn last_selected(&self) -> Option<usize> {
        self.last_selected
    }

    /// Replaces the endpoint list (DNS re-expansion). Does not reset
    /// `last_selected`: index stability across a refresh is what the
    /// same-index liveness check depends on.
    pub fn replace(&mut self, endpoints: Vec<String>) {
        self.endpoints = endpoints;
    }

    /// Draws a uniformly random index and records it as selected.
    pub fn pick_index(&mut self, rng: &mut impl Rng) -> Option<usize> {
        if self.endpoints.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.endpoints.len());
        self.last_selected = Some(index);
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn picking_an_index_records_it_as_last_selected() {
        let mut list = ServerList::new(vec!["a:1".to_string(), "b:2".to_string()]);
        let mut rng = StepRng::new(0, 1);
        let idx = list.pick_index(&mut rng).unwrap();
        assert_eq!(list.last_selected(), Some(idx));
    }

    #[test]
    fn empty_list_yields_no_index() {
        let mut list = ServerList::new(vec![]);
        let mut rng = StepRng::new(0, 1);
        assert_eq!(list.pick_index(&mut rng), None);
    }

    #[test]
    fn replace_does_not_touch_last_selected() {
        let mut list = ServerList::new(vec!["a:1".to_string()]);
        let mut rng = StepRng::new(0, 1);
        list.pick_index(&mut rng);
        list.replace(vec!["a:1".to_string(), "c:3".to_string()]);
        assert_eq!(list.last_selected(), Some(0));
    }
}
