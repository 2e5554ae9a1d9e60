//! Unit tests for the ordered queue.

use rail_core::AgentId;

use crate::{OrderedQueue, Payload, QueueError};

fn agent(n: u64) -> Payload {
    Payload::Agent(AgentId(n))
}

#[cfg(test)]
mod ordering {
    use super::*;

    #[test]
    fn pops_in_time_order() {
        let mut q = OrderedQueue::new();
        q.insert(5.0, agent(0));
        q.insert(6.0, agent(1));
        q.insert(3.0, agent(2));
        assert_eq!(q.pop().unwrap().payload, agent(2));
        assert_eq!(q.pop().unwrap().payload, agent(0));
        assert_eq!(q.pop().unwrap().payload, agent(1));
    }

    #[test]
    fn equal_times_pop_in_insertion_order() {
        let mut q = OrderedQueue::new();
        q.insert(1.0, agent(0));
        q.insert(1.0, agent(1));
        q.insert(0.5, agent(2));
        q.insert(1.0, agent(3));
        assert_eq!(q.pop().unwrap().payload, agent(2));
        assert_eq!(q.pop().unwrap().payload, agent(0));
        assert_eq!(q.pop().unwrap().payload, agent(1));
        assert_eq!(q.pop().unwrap().payload, agent(3));
    }

    #[test]
    fn pop_empty_errors() {
        let mut q = OrderedQueue::new();
        assert_eq!(q.pop().unwrap_err(), QueueError::Empty);
    }

    #[test]
    fn infinite_times_sort_last() {
        let mut q = OrderedQueue::new();
        q.insert(f64::INFINITY, agent(0));
        q.insert(2.0, agent(1));
        assert_eq!(q.pop().unwrap().payload, agent(1));
        assert_eq!(q.pop().unwrap().time, f64::INFINITY);
    }
}

#[cfg(test)]
mod removal {
    use super::*;

    fn filled() -> OrderedQueue {
        let mut q = OrderedQueue::new();
        q.insert(5.0, agent(10));
        q.insert(3.0, agent(5));
        q.insert(7.0, agent(100));
        q.insert(0.1, agent(7));
        q
    }

    #[test]
    fn exact_time_removal() {
        let mut q = filled();
        assert!(matches!(
            q.remove_at(4.0),
            Err(QueueError::NotFound(_))
        ));
        q.remove_at(3.0).unwrap();
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn range_removal_is_silent_on_empty_interval() {
        let mut q = filled();
        q.remove_range(4.0, 7.0); // drops the 5.0 entry only
        assert_eq!(q.len(), 3);
        q.remove_range(20.0, 30.0); // empty interval, no error
        assert_eq!(q.len(), 3);
        q.remove_range(0.0, 8.0);
        assert!(q.is_empty());
    }

    #[test]
    fn identity_removal() {
        let mut q = filled();
        q.remove_payload(agent(100)).unwrap();
        assert!(!q.contains_payload(agent(100)));
        assert!(matches!(
            q.remove_payload(agent(100)),
            Err(QueueError::NotFound(_))
        ));
    }

    #[test]
    fn purge_drains_all_occurrences_silently() {
        let mut q = OrderedQueue::new();
        q.insert(1.0, agent(1));
        q.insert(2.0, agent(1));
        q.insert(3.0, agent(2));
        assert_eq!(q.purge_payload(agent(1)), 2);
        assert_eq!(q.purge_payload(agent(1)), 0); // idempotent
        assert_eq!(q.len(), 1);
    }
}

#[cfg(test)]
mod shifting {
    use super::*;

    #[test]
    fn shift_moves_every_entry() {
        let mut q = OrderedQueue::new();
        for i in 0..10 {
            q.insert(10.0 - i as f64, agent(i as u64));
        }
        q.shift_times(5.0);
        assert_eq!(q.peek_time(), Some(6.0));
        q.shift_times(-10.0);
        assert_eq!(q.peek_time(), Some(-4.0));
    }

    #[test]
    fn reporter_payload_coexists_with_agents() {
        let mut q = OrderedQueue::new();
        q.insert(1.0, Payload::Reporter);
        q.insert(0.5, agent(0));
        assert_eq!(q.pop().unwrap().payload, agent(0));
        assert_eq!(q.pop().unwrap().payload, Payload::Reporter);
    }
}
