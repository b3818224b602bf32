#[derive(Debug)]
pub struct InputError {
  pub message: String,
  pub line: Option<usize>,
  pub context: Option<String>,
}

impl InputError {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into(), line: None, context: None }
  }

  pub fn with_line(mut self, line: usize) -> Self {
    self.line = Some(line);
    self
  }

  pub fn with_context(mut self, context: impl Into<String>) -> Self {
    self.context = Some(context.into());
    self
  }
}

impl std::fmt::Display for InputError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.message)?;
    if let Some(line) = self.line {
      write!(f, " (line {})", line)?;
    }
    if let Some(ctx) = &self.context {
      write!(f, " [{}]", ctx)?;
    }
    Ok(())
  }
}

impl std::error::Error for InputError {}

impl From<std::io::Error> for InputError {
  fn from(err: std::io::Error) -> Self {
    InputError::new(format!("IO error: {}", err))
  }
}

/// A display option rejected before any file I/O, naming the offending parameter
#[derive(Debug)]
pub struct OptionsError {
  pub parameter: &'static str,
  pub message: String,
}

impl OptionsError {
  pub fn new(parameter: &'static str, message: impl Into<String>) -> Self {
    Self { parameter, message: message.into() }
  }
}

impl std::fmt::Display for OptionsError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Invalid {}: {}", self.parameter, self.message)
  }
}

impl std::error::Error for OptionsError {}

/// Top-level error for the render pipeline
#[derive(Debug)]
pub enum RenderError {
  Input(InputError),
  Options(OptionsError),
  Output(String),
}

impl std::fmt::Display for RenderError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RenderError::Input(err) => write!(f, "{}", err),
      RenderError::Options(err) => write!(f, "{}", err),
      RenderError::Output(message) => write!(f, "{}", message),
    }
  }
}

impl std::error::Error for RenderError {}

impl From<InputError> for RenderError {
  fn from(err: InputError) -> Self {
    RenderError::Input(err)
  }
}

impl From<OptionsError> for RenderError {
  fn from(err: OptionsError) -> Self {
    RenderError::Options(err)
  }
}
