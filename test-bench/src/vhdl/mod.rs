//! VHDL test bench emission.
//!
//! The test bench is written section by section through [`TestbenchWriter`]:
//!
//! 1. library preamble and the `NUM_TEST` / `IMG_DIM` / `MEM_DIM` constants
//! 2. signal declarations and the RAM type
//! 3. the RAM initializer holding every test's width, height and input image
//! 4. the device under test, clock generator and memory process
//! 5. the stimulus process asserting every expected output pixel
//! 6. the final "TEST PASSED" assertion
//!
//! Each test owns a region of `MEM_DIM` words laid out as
//!
//! ```text
//! offset 0                 width
//! offset 1                 height
//! offset 2 .. 2+n          input image, row-major
//! offset 2+n .. 2+2n       output image written by the device
//! ```
//!
//! The text is byte-for-byte what the simulation scripts expect, including
//! column padding, so every number goes through a fixed-width format.

mod template;

use crate::suite::{TestCase, TestSuite};
use std::io::{self, Write};
use thiserror::Error;

/// Offset of the width word in a test's memory region.
pub const WIDTH_OFFSET: usize = 0;
/// Offset of the height word in a test's memory region.
pub const HEIGHT_OFFSET: usize = 1;
/// Offset of the first input pixel in a test's memory region.
pub const INPUT_OFFSET: usize = 2;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Failed to write test bench: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, EmitError>;

/// Offset of output pixel `index` for a case with `pixel_count` pixels.
pub fn output_offset(pixel_count: usize, index: usize) -> usize {
    INPUT_OFFSET + pixel_count + index
}

/// Section-by-section writer for the VHDL test bench.
pub struct TestbenchWriter<W: Write> {
    out: W,
}

impl<W: Write> TestbenchWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Library clauses, entity and generator constants.
    pub fn header(&mut self, suite: &TestSuite) -> Result<()> {
        self.out.write_all(template::LIBRARY_PREAMBLE.as_bytes())?;
        writeln!(self.out, "constant NUM_TEST : integer := {};", suite.len())?;
        writeln!(self.out, "constant IMG_DIM : integer := {};", suite.img_dim())?;
        self.out
            .write_all(template::MEM_DIM_DECLARATION.as_bytes())?;
        Ok(())
    }

    pub fn signals(&mut self) -> Result<()> {
        self.out.write_all(template::SIGNALS.as_bytes())?;
        Ok(())
    }

    /// RAM initializer: one `offset => value` entry per stored word.
    pub fn ram(&mut self, suite: &TestSuite) -> Result<()> {
        self.out.write_all(template::RAM_OPEN.as_bytes())?;
        for (test, case) in suite.cases().iter().enumerate() {
            let size = case.size();
            self.ram_entry(test, WIDTH_OFFSET, size.width)?;
            self.ram_entry(test, HEIGHT_OFFSET, size.height)?;
            for (index, &pixel) in case.input().iter().enumerate() {
                self.ram_entry(test, INPUT_OFFSET + index, usize::from(pixel))?;
            }
        }
        self.out.write_all(template::RAM_CLOSE.as_bytes())?;
        Ok(())
    }

    fn ram_entry(&mut self, test: usize, offset: usize, value: usize) -> Result<()> {
        writeln!(
            self.out,
            "            {test:>3} * MEM_DIM + {offset:>5} => std_logic_vector(to_unsigned({value:>4}, 8)),"
        )?;
        Ok(())
    }

    /// Device under test, clock generator and memory process.
    pub fn component(&mut self) -> Result<()> {
        self.out.write_all(template::COMPONENT.as_bytes())?;
        Ok(())
    }

    /// Reset sequence followed by one start/done handshake and the output
    /// assertions for every test.
    pub fn stimulus(&mut self, suite: &TestSuite) -> Result<()> {
        self.out.write_all(template::STIMULUS_RESET.as_bytes())?;
        for (test, case) in suite.cases().iter().enumerate() {
            writeln!(self.out, "    memoryNum <= {test};")?;
            self.out.write_all(template::START_HANDSHAKE.as_bytes())?;
            self.assertions(case)?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn assertions(&mut self, case: &TestCase) -> Result<()> {
        let count = case.pixel_count();
        for (index, &expected) in case.expected().iter().enumerate() {
            let offset = output_offset(count, index);
            writeln!(
                self.out,
                "    assert RAM({offset:>5} + MEM_DIM * memoryNum) = std_logic_vector(to_unsigned({expected:>4}, 8)) \
                 report \"TEST FAILED (WORKING ZONE). Expected {expected:>4} found \" \
                 & integer'image(to_integer(unsigned(RAM({offset:>5} + MEM_DIM * memoryNum))))  severity failure;"
            )?;
        }
        Ok(())
    }

    pub fn footer(&mut self) -> Result<()> {
        self.out.write_all(template::FOOTER.as_bytes())?;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Write the complete test bench for `suite` into `out`.
pub fn write_testbench<W: Write>(suite: &TestSuite, out: W) -> Result<W> {
    let mut writer = TestbenchWriter::new(out);
    writer.header(suite)?;
    writer.signals()?;
    writer.ram(suite)?;
    writer.component()?;
    writer.stimulus(suite)?;
    writer.footer()?;
    writer.finish()
}

/// Render the complete test bench to a string.
pub fn render_testbench(suite: &TestSuite) -> Result<String> {
    let bytes = write_testbench(suite, Vec::new())?;
    // All template text and numbers are ASCII.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use equalizer::ImageSize;

    fn single_pixel_suite() -> TestSuite {
        let case = TestCase::from_pixels(ImageSize::square(1), vec![7]).unwrap();
        TestSuite::from_cases(ImageSize::square(128), vec![case]).unwrap()
    }

    #[test]
    fn test_single_pixel_layout() {
        let text = render_testbench(&single_pixel_suite()).unwrap();
        assert!(text.contains(
            "              0 * MEM_DIM +     0 => std_logic_vector(to_unsigned(   1, 8)),\n"
        ));
        assert!(text.contains(
            "              0 * MEM_DIM +     1 => std_logic_vector(to_unsigned(   1, 8)),\n"
        ));
        assert!(text.contains(
            "              0 * MEM_DIM +     2 => std_logic_vector(to_unsigned(   7, 8)),\n"
        ));
        assert!(text.contains(
            "    assert RAM(    3 + MEM_DIM * memoryNum) = std_logic_vector(to_unsigned(   0, 8)) report \"TEST FAILED (WORKING ZONE). Expected    0 found \" & integer'image(to_integer(unsigned(RAM(    3 + MEM_DIM * memoryNum))))  severity failure;\n"
        ));
    }

    #[test]
    fn test_constants() {
        let text = render_testbench(&single_pixel_suite()).unwrap();
        assert!(text.contains("constant NUM_TEST : integer := 1;\n"));
        assert!(text.contains("constant IMG_DIM : integer := 16384;\n"));
        assert!(text.contains("constant MEM_DIM : integer := 2 + IMG_DIM * 2;\n\n"));
    }

    #[test]
    fn test_section_order() {
        let text = render_testbench(&single_pixel_suite()).unwrap();
        let positions: Vec<usize> = [
            "library ieee;",
            "constant NUM_TEST",
            "signal\tmemoryNum : natural;",
            "signal RAM: ram_type := (",
            "others => (others =>'0'));",
            "component project_reti_logiche is",
            "p_CLK_GEN : process is",
            "MEM : process(tb_clk)",
            "test : process is",
            "    memoryNum <= 0;",
            "    assert RAM(",
            "Simulation Ended! TEST PASSED",
        ]
        .iter()
        .map(|needle| text.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
        assert!(text.starts_with("library ieee;\n"));
        assert!(text.ends_with("end process test;\n\nend projecttb;\n"));
    }

    #[test]
    fn test_two_cases_offsets() {
        let a = TestCase::from_pixels(ImageSize::square(2), vec![10, 20, 30, 40]).unwrap();
        let b = TestCase::from_pixels(ImageSize::from_width_height(3, 1), vec![5, 5, 5]).unwrap();
        let suite = TestSuite::from_cases(ImageSize::square(4), vec![a, b]).unwrap();
        let text = render_testbench(&suite).unwrap();

        assert!(text.contains("constant NUM_TEST : integer := 2;\n"));
        assert!(text.contains("constant IMG_DIM : integer := 16;\n"));
        assert!(text.contains("              0 * MEM_DIM +     5 => std_logic_vector(to_unsigned(  40, 8)),\n"));
        assert!(text.contains("              1 * MEM_DIM +     0 => std_logic_vector(to_unsigned(   3, 8)),\n"));
        assert!(text.contains("              1 * MEM_DIM +     1 => std_logic_vector(to_unsigned(   1, 8)),\n"));
        assert!(text.contains("    memoryNum <= 1;\n"));

        // First case outputs [0, 160, 255, 255] at offsets 6..10.
        assert!(text.contains("assert RAM(    6 + MEM_DIM * memoryNum) = std_logic_vector(to_unsigned(   0, 8))"));
        assert!(text.contains("assert RAM(    7 + MEM_DIM * memoryNum) = std_logic_vector(to_unsigned( 160, 8))"));
        assert!(text.contains("assert RAM(    9 + MEM_DIM * memoryNum) = std_logic_vector(to_unsigned( 255, 8))"));
        // Uniform second case outputs zeros at offsets 5..8.
        assert!(text.contains("assert RAM(    7 + MEM_DIM * memoryNum) = std_logic_vector(to_unsigned(   0, 8))"));

        assert_eq!(text.matches("    assert RAM(").count(), 7);
        assert_eq!(text.matches(" * MEM_DIM + ").count(), 2 + 4 + 2 + 3);
    }

    #[test]
    fn test_empty_suite_is_well_formed() {
        let suite = TestSuite::from_cases(ImageSize::square(1), Vec::new()).unwrap();
        let text = render_testbench(&suite).unwrap();
        assert!(text.contains("constant NUM_TEST : integer := 0;\n"));
        assert!(!text.contains("memoryNum <= "));
        assert!(text.contains("signal RAM: ram_type := (\n            others => (others =>'0'));\n"));
    }

    #[test]
    fn test_stimulus_block_for_one_case() {
        let text = render_testbench(&single_pixel_suite()).unwrap();
        let expected = concat!(
            "    wait for 100 ns;\n",
            "    memoryNum <= 0;\n",
            "    wait for c_CLOCK_PERIOD;\n",
            "    tb_start <= '1';\n",
            "    wait for c_CLOCK_PERIOD;\n",
            "    wait until tb_done = '1';\n",
            "    wait for c_CLOCK_PERIOD;\n",
            "    tb_start <= '0';\n",
            "    wait until tb_done = '0';\n\n",
            "    assert RAM(",
        );
        assert!(text.contains(expected));
        assert!(text.contains(
            "severity failure;\n\n   assert false report \"Simulation Ended! TEST PASSED\" severity failure;\n"
        ));
    }

    #[test]
    fn test_output_offset() {
        assert_eq!(output_offset(1, 0), 3);
        assert_eq!(output_offset(4, 3), 9);
    }
}
