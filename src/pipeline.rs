//! The colorizing pipeline
//!
//! Wires the chunk reader, tokenizer, colorizer and output buffer together,
//! one input unit at a time. An input unit that does not fit the input
//! buffer switches the pipeline to [`PipelineState::Degraded`]: everything
//! colored so far is flushed, a warning goes to the diagnostic stream, and
//! the rest of the input is copied through verbatim.

use std::io::{BufRead, Write};

use crate::color::Colorizer;
use crate::config::{Config, FlushMode};
use crate::error::Result;
use crate::stream::{ChunkReader, OutputBuffer};
use crate::text::Tokenizer;

/// Pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// Words are being colored
    #[default]
    Normal,
    /// Coloring gave up after an oversized unit; input is copied verbatim
    Degraded,
}

/// Colors words from an input stream onto an output stream
#[derive(Debug, Clone)]
pub struct Pipeline {
    tokenizer: Tokenizer,
    colorizer: Colorizer,
    flush_mode: FlushMode,
    passthrough: bool,
    buffer_size: usize,
    output_size: usize,
    state: PipelineState,
}

impl Pipeline {
    pub fn new(config: &Config) -> Result<Self> {
        let palette = config.palette()?;
        let output_size = config.effective_output_size(&palette);
        tracing::debug!(
            "pipeline: {} colors, input buffer {} bytes, output buffer {} bytes, {:?}",
            palette.len(),
            config.buffer_size,
            output_size,
            config.flush_mode
        );

        Ok(Self {
            tokenizer: Tokenizer::new(config.separators.clone(), config.word_limit),
            colorizer: Colorizer::new(palette, config.seed),
            flush_mode: config.flush_mode,
            passthrough: config.passthrough,
            buffer_size: config.buffer_size,
            output_size,
            state: PipelineState::Normal,
        })
    }

    /// State reached by the last run
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Process all of `input`, writing to `output`.
    ///
    /// `diag` receives the overflow warning. Returns the final state.
    pub fn run<R, W, E>(&mut self, input: R, output: &mut W, diag: &mut E) -> Result<PipelineState>
    where
        R: BufRead,
        W: Write + ?Sized,
        E: Write + ?Sized,
    {
        self.state = PipelineState::Normal;
        let mut reader = ChunkReader::new(input, self.buffer_size, self.flush_mode.read_mode());

        if self.passthrough {
            tracing::debug!("passthrough mode, copying input unchanged");
            reader.copy_remaining(output)?;
            output.flush()?;
            return Ok(self.state);
        }

        let mut out = OutputBuffer::new(output, self.output_size);
        loop {
            let outcome = reader.read();
            if outcome.overflow {
                self.degrade(&mut reader, &mut out, diag)?;
                break;
            }
            if outcome.end_of_input {
                // Whatever the block reader still carries is the final word
                self.emit(reader.chunk(), &mut out)?;
                break;
            }

            match self.flush_mode {
                FlushMode::PerLine => {
                    self.emit(reader.chunk(), &mut out)?;
                    out.flush_stream()?;
                },
                FlushMode::BlockBuffered => {
                    let carry = self.emit_complete(reader.chunk(), &mut out)?;
                    reader.carry_from(carry);
                },
            }
        }

        out.flush_stream()?;
        Ok(self.state)
    }

    /// Color every run of `chunk`
    fn emit<W: Write>(&self, chunk: &[u8], out: &mut OutputBuffer<W>) -> Result<()> {
        for run in self.tokenizer.tokenize(chunk) {
            for part in self.colorizer.colorize(run.kind, run.bytes(chunk)).parts() {
                out.add(part)?;
            }
        }
        Ok(())
    }

    /// Color every run except a word touching the end of `chunk`, which may
    /// continue in the next block. Returns where that word starts.
    fn emit_complete<W: Write>(&self, chunk: &[u8], out: &mut OutputBuffer<W>) -> Result<usize> {
        for run in self.tokenizer.tokenize(chunk) {
            if run.is_word() && run.end() == chunk.len() {
                return Ok(run.start);
            }
            for part in self.colorizer.colorize(run.kind, run.bytes(chunk)).parts() {
                out.add(part)?;
            }
        }
        Ok(chunk.len())
    }

    fn degrade<R, W, E>(
        &mut self,
        reader: &mut ChunkReader<R>,
        out: &mut OutputBuffer<W>,
        diag: &mut E,
    ) -> Result<()>
    where
        R: BufRead,
        W: Write,
        E: Write + ?Sized,
    {
        // Colored output must land before anything from the oversized unit
        out.flush_stream()?;

        writeln!(
            diag,
            "warning: more than {} bytes in {} - degrading to plain cat",
            reader.capacity(),
            self.flush_mode.unit_name()
        )?;
        diag.flush()?;
        self.state = PipelineState::Degraded;
        tracing::debug!("pipeline degraded, copying the rest of the input verbatim");

        let raw = out.get_mut();
        raw.write_all(reader.chunk())?;
        reader.copy_remaining(raw)?;
        raw.flush()?;
        Ok(())
    }
}
