/// A pipe parsed from the [PIPES] section.
/// Endpoint ids are not validated at parse time; a pipe whose endpoints
/// do not resolve against the node table is skipped at render time.
pub struct Pipe {
  pub id: Box<str>,
  pub start_node: Box<str>,
  pub end_node: Box<str>,
}
