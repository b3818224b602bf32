use std::fs::File;
use std::io::{BufRead, BufReader};

use simplelog::debug;

use crate::error::InputError;
use crate::model::network::Network;
use crate::model::node::Node;
use crate::model::pipe::Pipe;

#[derive(Debug)]
enum ReadState {
  Coordinates,
  Pipes,
  Reservoirs,
  Vertices,
  None,
}

impl Network {
  /// Read a network's map data from an INP file.
  pub fn read_inp(&mut self, inp: &str) -> Result<(), InputError> {
    // open the INP file
    let file = File::open(inp)
      .map_err(|e| InputError::new(format!("Failed to open file: {}: {}", inp, e)))?;

    self.parse(BufReader::new(file))
  }

  /// Parse INP content from a buffered reader.
  ///
  /// Malformed individual records are silently dropped; the parse only
  /// fails if the file cannot be read or if no coordinate or pipe records
  /// were found at all.
  pub fn parse(&mut self, mut reader: impl BufRead) -> Result<(), InputError> {
    // set the initial state to none
    let mut state = ReadState::None;

    let mut line_buffer = String::with_capacity(512);
    let mut line_number = 0usize;
    let mut dropped = 0usize;

    // iterate over the lines in the file
    loop {
      line_buffer.clear();
      let read = reader
        .read_line(&mut line_buffer)
        .map_err(|e| InputError::from(e).with_line(line_number + 1))?;
      if read == 0 {
        break;
      }
      line_number += 1;
      let line = line_buffer.trim();

      if line.starts_with(';') || line.is_empty() {
        // skip comment and empty lines
      }
      // if the line starts with [, it is a new section
      else if line.starts_with('[') {
        // section names match case-insensitively; unknown sections are
        // recognized as headers but their body lines are ignored
        state = match line.to_uppercase().as_str() {
          "[COORDINATES]" => ReadState::Coordinates,
          "[PIPES]" => ReadState::Pipes,
          "[RESERVOIRS]" => ReadState::Reservoirs,
          "[VERTICES]" => ReadState::Vertices,
          _ => ReadState::None,
        }
      } else {
        let recorded = match state {
          ReadState::Coordinates => self.read_coordinate(line),
          ReadState::Pipes => self.read_pipe(line),
          ReadState::Reservoirs => self.read_reservoir(line),
          ReadState::Vertices => self.read_vertex(line),
          ReadState::None => true,
        };
        if !recorded {
          dropped += 1;
        }
      }
    }

    if dropped > 0 {
      debug!("Dropped {} malformed record(s)", dropped);
    }

    if self.nodes.is_empty() {
      return Err(InputError::new("No coordinate records found").with_context("[COORDINATES]"));
    }
    if self.pipes.is_empty() {
      return Err(InputError::new("No pipe records found").with_context("[PIPES]"));
    }
    Ok(())
  }

  /// Read a coordinate record: `<node_id> <x> <y>`, extra tokens ignored.
  /// Returns false if the record is malformed.
  fn read_coordinate(&mut self, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let Some(id) = parts.next() else { return false };
    let Some(x) = parts.next().and_then(|s| s.parse::<f64>().ok()) else { return false };
    let Some(y) = parts.next().and_then(|s| s.parse::<f64>().ok()) else { return false };

    self.add_node(Node { id: id.into(), x, y });
    true
  }

  /// Read a pipe record: `<pipe_id> <start_node_id> <end_node_id> ...`.
  /// Endpoints are recorded without validation; extra tokens ignored.
  fn read_pipe(&mut self, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let (Some(id), Some(start), Some(end)) = (parts.next(), parts.next(), parts.next()) else {
      return false;
    };

    self.add_pipe(Pipe { id: id.into(), start_node: start.into(), end_node: end.into() });
    true
  }

  /// Read a reservoir record: only the first token (the node id) is used.
  fn read_reservoir(&mut self, line: &str) -> bool {
    match line.split_whitespace().next() {
      Some(id) => {
        self.reservoirs.insert(id.into());
        true
      }
      None => false,
    }
  }

  /// Read a vertex record: `<pipe_id> <x> <y>`, appended in encounter order.
  fn read_vertex(&mut self, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let Some(id) = parts.next() else { return false };
    let Some(x) = parts.next().and_then(|s| s.parse::<f64>().ok()) else { return false };
    let Some(y) = parts.next().and_then(|s| s.parse::<f64>().ok()) else { return false };

    self.add_vertex(id, x, y);
    true
  }
}
