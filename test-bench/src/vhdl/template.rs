//! Fixed VHDL text surrounding the generated test data.

pub const LIBRARY_PREAMBLE: &str = concat!(
    "library ieee;\n",
    "use ieee.std_logic_1164.all;\n",
    "use ieee.numeric_std.all;\n",
    "use ieee.std_logic_unsigned.all;\n\n",
    "entity project_tb is\n",
    "end project_tb;\n\n",
    "architecture projecttb of project_tb is\n",
);

pub const MEM_DIM_DECLARATION: &str = "constant MEM_DIM : integer := 2 + IMG_DIM * 2;\n\n";

pub const SIGNALS: &str = concat!(
    "constant c_CLOCK_PERIOD         : time := 15 ns;\n",
    "signal   tb_done                : std_logic;\n",
    "signal   mem_address            : std_logic_vector (15 downto 0) := (others => '0');\n",
    "signal   tb_rst                 : std_logic := '0';\n",
    "signal   tb_start               : std_logic := '0';\n",
    "signal   tb_clk                 : std_logic := '0';\n",
    "signal   mem_o_data,mem_i_data  : std_logic_vector (7 downto 0);\n",
    "signal   enable_wire            : std_logic;\n",
    "signal   mem_we                 : std_logic;\n\n",
    "signal\tmemoryNum : natural;\n\n",
    "type ram_type is array (NUM_TEST * MEM_DIM - 1 downto 0) of std_logic_vector(7 downto 0);\n\n",
);

pub const RAM_OPEN: &str = "signal RAM: ram_type := (\n";

pub const RAM_CLOSE: &str = "            others => (others =>'0'));\n\n";

/// DUT declaration, port map, clock generator and the RAM model keyed by
/// `memoryNum`.
pub const COMPONENT: &str = concat!(
    "component project_reti_logiche is\n",
    "port (\n",
    "      i_clk         : in  std_logic;\n",
    "      i_start       : in  std_logic;\n",
    "      i_rst         : in  std_logic;\n",
    "      i_data        : in  std_logic_vector(7 downto 0);\n",
    "      o_address     : out std_logic_vector(15 downto 0);\n",
    "      o_done        : out std_logic;\n",
    "      o_en          : out std_logic;\n",
    "      o_we          : out std_logic;\n",
    "      o_data        : out std_logic_vector (7 downto 0)\n",
    "      );\n",
    "end component project_reti_logiche;\n",
    "\n",
    "begin\n",
    "UUT: project_reti_logiche\n",
    "port map (\n",
    "          i_clk        => tb_clk,\n",
    "          i_start      => tb_start,\n",
    "          i_rst        => tb_rst,\n",
    "          i_data       => mem_o_data,\n",
    "          o_address    => mem_address,\n",
    "          o_done       => tb_done,\n",
    "          o_en         => enable_wire,\n",
    "          o_we         => mem_we,\n",
    "          o_data       => mem_i_data\n",
    ");\n",
    "\n",
    "p_CLK_GEN : process is\n",
    "begin\n",
    "   wait for c_CLOCK_PERIOD/2;\n",
    "   tb_clk <= not tb_clk;\n",
    "end process p_CLK_GEN;\n",
    "\n",
    "MEM : process(tb_clk)\n",
    "begin\n",
    "   if tb_clk'event and tb_clk = '1' then\n",
    "       if enable_wire = '1' then\n",
    "           if mem_we = '1' then\n",
    "               RAM(MEM_DIM * memoryNum + conv_integer(mem_address))   <= mem_i_data;\n",
    "               mem_o_data                                              <= mem_i_data after 1 ns;\n",
    "           else\n",
    "               mem_o_data <= RAM(MEM_DIM * memoryNum + conv_integer(mem_address)) after 1 ns;\n",
    "           end if;\n",
    "       end if;\n",
    "   end if;\n",
    "end process;\n",
    "\n",
);

pub const STIMULUS_RESET: &str = concat!(
    "test : process is\n",
    "begin\n\n",
    "    wait for c_CLOCK_PERIOD;\n",
    "    tb_rst <= '1';\n",
    "    wait for c_CLOCK_PERIOD;\n",
    "    wait for 100 ns;\n",
    "    tb_rst <= '0';\n",
    "    wait for c_CLOCK_PERIOD;\n",
    "    wait for 100 ns;\n",
);

/// Start pulse and done handshake, emitted after `memoryNum <= i;`.
pub const START_HANDSHAKE: &str = concat!(
    "    wait for c_CLOCK_PERIOD;\n",
    "    tb_start <= '1';\n",
    "    wait for c_CLOCK_PERIOD;\n",
    "    wait until tb_done = '1';\n",
    "    wait for c_CLOCK_PERIOD;\n",
    "    tb_start <= '0';\n",
    "    wait until tb_done = '0';\n\n",
);

pub const FOOTER: &str = concat!(
    "   assert false report \"Simulation Ended! TEST PASSED\" severity failure;\n",
    "end process test;\n\n",
    "end projecttb;\n",
);
