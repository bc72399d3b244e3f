/// Watches a solver run one event at a time and may steer it.
///
/// A solver calls [`observe`](Observer::observe) once per event `E`. Returning
/// `Some(action)` asks the solver to act (for example, to stop early); `None`
/// lets the run continue. Whether an action is honored for a given event is
/// up to the solver.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is the
/// observer that never acts.
pub trait Observer<E, A> {
    /// Handles one event.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<O: Observer<u32, &'static str>>(mut observer: O, events: &[u32]) -> Option<&'static str> {
        events.iter().find_map(|event| observer.observe(event))
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(run((), &[1, 2, 3]), None);
    }

    #[test]
    fn closure_observer_can_act() {
        let mut seen = Vec::new();
        let action = run(
            |event: &u32| {
                seen.push(*event);
                (*event == 2).then_some("stop")
            },
            &[1, 2, 3],
        );

        assert_eq!(action, Some("stop"));
        assert_eq!(seen, vec![1, 2]);
    }
}
