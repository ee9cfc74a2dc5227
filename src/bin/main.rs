use tracing_subscriber::EnvFilter;
use vm::{compute_with, VmConfig, MEMORY_SHIFT, MEMORY_SIZE};

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  // m[2] ← m[0] - m[1]
  #[rustfmt::skip]
  let program = [
    0x01, 0x01, 0x00,
    0x01, 0x02, 0x01,
    0x04, 0x01, 0x02,
    0x02, 0x01, 0x02,
    0xff,
  ];
  let mut memory = [0u8; MEMORY_SIZE];
  memory[0] = 10;
  memory[1] = 3;
  memory[MEMORY_SHIFT..MEMORY_SHIFT + program.len()].copy_from_slice(&program);

  dbg!(compute_with(&mut memory, &VmConfig::default()).ok());
  dbg!(&memory[..MEMORY_SHIFT]);
}
