use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

/// An in memory output sink.  Clones share the same buffer, so an embedder can hand one clone to
/// the interpreter and keep another to read back what was printed.
#[derive(Clone, Default)]
pub struct CapturedOutput {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl Write for CapturedOutput {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedOutput {
    /// Create a new empty capture buffer.
    pub fn new() -> CapturedOutput {
        CapturedOutput::default()
    }

    /// Everything printed so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).to_string()
    }

    /// Return everything printed so far and empty the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.buffer.borrow_mut());
        String::from_utf8_lossy(&bytes).to_string()
    }
}
