/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! Commands scheduled for logical channels.
use std::collections::VecDeque;

use crate::channel::Loop;
use crate::sample::SampleHandle;

/// A mutation of a channel state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandKind {
    /// Starts playing a sample from the given offset.
    Sample { handle: SampleHandle, offset: usize },
    Loop(Loop),
    Pitch(f64),
    Volume(f64),
    /// Silences the channel and restores its default parameters.
    Clear
}

/// A command scheduled at the mixer time measured in output sample ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Command {
    pub time: u64,
    pub kind: CommandKind
}

impl Command {
    pub const fn new(time: u64, kind: CommandKind) -> Self {
        Command { time, kind }
    }
}

/// Pending commands of a single channel kept sorted by time.
///
/// Commands scheduled at the same time stay in the order they were pushed.
#[derive(Clone, Debug, Default)]
pub struct CommandQueue {
    commands: VecDeque<Command>
}

impl CommandQueue {
    pub fn new() -> Self {
        CommandQueue::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Inserts the command after every pending command scheduled at the same time or earlier.
    pub fn push(&mut self, command: Command) {
        let index = self.commands.partition_point(|c| c.time <= command.time);
        self.commands.insert(index, command);
    }

    /// Removes every command scheduled at `time` or later. Returns the number of removed commands.
    pub fn discard_from(&mut self, time: u64) -> usize {
        let index = self.commands.partition_point(|c| c.time < time);
        let removed = self.commands.len() - index;
        self.commands.truncate(index);
        removed
    }

    /// Removes and returns the earliest command if it is scheduled at `time` or earlier.
    pub fn pop_due(&mut self, time: u64) -> Option<Command> {
        match self.commands.front() {
            Some(command) if command.time <= time => self.commands.pop_front(),
            _ => None
        }
    }

    /// Returns an iterator of pending commands in the order of application.
    pub fn iter(&self) -> impl Iterator<Item=&Command> {
        self.commands.iter()
    }

    pub fn clear(&mut self) {
        self.commands.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(queue: &CommandQueue) -> Vec<(u64, CommandKind)> {
        queue.iter().map(|c| (c.time, c.kind)).collect()
    }

    #[test]
    fn keeps_commands_ordered() {
        let mut queue = CommandQueue::new();
        queue.push(Command::new(20, CommandKind::Pitch(2.0)));
        queue.push(Command::new(10, CommandKind::Pitch(1.0)));
        queue.push(Command::new(20, CommandKind::Volume(0.5)));
        queue.push(Command::new(10, CommandKind::Clear));
        queue.push(Command::new(30, CommandKind::Volume(0.0)));
        assert_eq!(times(&queue), [
            (10, CommandKind::Pitch(1.0)),
            (10, CommandKind::Clear),
            (20, CommandKind::Pitch(2.0)),
            (20, CommandKind::Volume(0.5)),
            (30, CommandKind::Volume(0.0))]);
        assert_eq!(queue.pop_due(9), None);
        assert_eq!(queue.pop_due(15), Some(Command::new(10, CommandKind::Pitch(1.0))));
        assert_eq!(queue.pop_due(15), Some(Command::new(10, CommandKind::Clear)));
        assert_eq!(queue.pop_due(15), None);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn discards_later_commands() {
        let mut queue = CommandQueue::new();
        for time in [5, 10, 10, 15] {
            queue.push(Command::new(time, CommandKind::Clear));
        }
        assert_eq!(queue.discard_from(20), 0);
        assert_eq!(queue.discard_from(10), 3);
        assert_eq!(times(&queue), [(5, CommandKind::Clear)]);
        queue.clear();
        assert!(queue.is_empty());
    }
}
