use vm::region::Region;
use vm::{compute, compute_with, Fault, InstructionSet, VmConfig, MEMORY_SHIFT, MEMORY_SIZE};

struct Case {
  x: u8,
  y: u8,
  out: u8,
}

struct Program {
  name: &'static str,
  asm: &'static str,
  cases: Vec<Case>,
}

fn reg(s: &str) -> u8 {
  match s {
    "r1" => 0x01,
    "r2" => 0x02,
    _ => panic!("unknown register: {s}"),
  }
}

fn byte(s: &str) -> u8 {
  s.parse().expect("invalid byte operand")
}

fn assemble(asm: &str) -> Vec<u8> {
  let mut code = Vec::new();
  for line in asm.trim().lines() {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
      [] => continue,
      ["load", r, a] => code.extend_from_slice(&[0x01, reg(r), byte(a)]),
      ["store", r, a] => code.extend_from_slice(&[0x02, reg(r), byte(a)]),
      ["add", d, s] => code.extend_from_slice(&[0x03, reg(d), reg(s)]),
      ["sub", d, s] => code.extend_from_slice(&[0x04, reg(d), reg(s)]),
      ["addi", d, v] => code.extend_from_slice(&[0x05, reg(d), byte(v)]),
      ["subi", d, v] => code.extend_from_slice(&[0x06, reg(d), byte(v)]),
      ["jump", a] => code.extend_from_slice(&[0x07, byte(a)]),
      ["beqz", r, o] => code.extend_from_slice(&[0x08, reg(r), byte(o)]),
      ["halt"] => code.push(0xff),
      _ => panic!("invalid instruction: {line}"),
    }
  }
  code
}

fn load_image(code: &[u8]) -> [u8; MEMORY_SIZE] {
  let mut memory = [0u8; MEMORY_SIZE];
  memory[MEMORY_SHIFT..MEMORY_SHIFT + code.len()].copy_from_slice(code);
  memory
}

fn run(program: &Program, config: &VmConfig) {
  let code = assemble(program.asm);
  for case in &program.cases {
    let mut memory = load_image(&code);
    memory[1] = case.x;
    memory[2] = case.y;
    compute_with(&mut memory, config)
      .unwrap_or_else(|fault| panic!("[{}] f({}, {}) faulted: {fault}", program.name, case.x, case.y));
    assert_eq!(
      memory[0], case.out,
      "[{}] expected f({}, {}) to be {}, not {}",
      program.name, case.x, case.y, case.out, memory[0]
    );
  }
}

fn base_programs() -> Vec<Program> {
  vec![
    Program {
      name: "halt",
      asm: "halt",
      cases: vec![Case { x: 0, y: 0, out: 0 }],
    },
    Program {
      name: "load store",
      asm: "
        load r1 1
        store r1 0
        halt",
      cases: vec![Case { x: 1, y: 0, out: 1 }, Case { x: 255, y: 0, out: 255 }],
    },
    Program {
      name: "add",
      asm: "
        load r1 1
        load r2 2
        add r1 r2
        store r1 0
        halt",
      cases: vec![
        Case { x: 1, y: 2, out: 3 },
        Case { x: 254, y: 1, out: 255 },
        Case { x: 255, y: 1, out: 0 },
      ],
    },
    Program {
      name: "subtract",
      asm: "
        load r1 1
        load r2 2
        sub r1 r2
        store r1 0
        halt",
      cases: vec![Case { x: 5, y: 3, out: 2 }, Case { x: 0, y: 1, out: 255 }],
    },
  ]
}

fn extended_programs() -> Vec<Program> {
  vec![
    Program {
      name: "jump",
      asm: "
        load r1 1
        jump 16
        store r1 0
        halt",
      cases: vec![Case { x: 42, y: 0, out: 0 }],
    },
    Program {
      name: "beqz",
      asm: "
        load r1 1
        load r2 2
        beqz r2 3
        store r1 0
        halt",
      cases: vec![Case { x: 42, y: 0, out: 0 }, Case { x: 42, y: 1, out: 42 }],
    },
    Program {
      name: "addi",
      asm: "
        load r1 1
        addi r1 3
        addi r1 5
        store r1 0
        halt",
      cases: vec![Case { x: 0, y: 0, out: 8 }, Case { x: 20, y: 0, out: 28 }],
    },
    Program {
      name: "sum to n",
      asm: "
        load r1 1
        beqz r1 8
        add r2 r1
        subi r1 1
        jump 11
        store r2 0
        halt",
      cases: vec![
        Case { x: 0, y: 0, out: 0 },
        Case { x: 1, y: 0, out: 1 },
        Case { x: 5, y: 0, out: 15 },
        Case { x: 10, y: 0, out: 55 },
      ],
    },
  ]
}

#[test]
fn base_instruction_set() {
  for program in base_programs() {
    run(&program, &VmConfig::default());
  }
}

#[test]
fn extended_instruction_set() {
  let config = VmConfig::default()
    .with_instruction_set(InstructionSet::Extended)
    .with_step_limit(1_000);
  for program in base_programs().iter().chain(extended_programs().iter()) {
    run(program, &config);
  }
}

#[test]
fn add_scenario() {
  #[rustfmt::skip]
  let mut memory = load_image(&[
    0x01, 0x01, 0x00,
    0x01, 0x02, 0x01,
    0x03, 0x01, 0x02,
    0x02, 0x01, 0x00,
    0xff,
  ]);
  memory[0] = 5;
  assert_eq!(compute(&mut memory), Ok(()));
  assert_eq!(memory[0], 5);
}

#[test]
fn subtract_scenario() {
  let mut memory = load_image(&assemble(
    "
    load r1 0
    load r2 1
    sub r1 r2
    store r1 2
    halt",
  ));
  memory[0] = 10;
  memory[1] = 3;
  let outcome = compute_with(&mut memory, &VmConfig::default()).unwrap();
  assert_eq!(memory[2], 7);
  assert_eq!(outcome.steps, 4);
}

#[test]
fn halt_only_leaves_image_untouched() {
  let mut memory = load_image(&[0xff]);
  memory[..MEMORY_SHIFT].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
  let before = memory;
  let outcome = compute_with(&mut memory, &VmConfig::default()).unwrap();
  assert_eq!(memory, before);
  assert_eq!(outcome.steps, 0);
  assert_eq!(outcome.registers.pc(), MEMORY_SHIFT);
}

#[test]
fn unknown_opcode_stops_before_later_instructions() {
  let mut memory = load_image(&[0x09, 0x01, 0x00, 0x02, 0x01, 0x00, 0xff]);
  memory[0] = 0xaa;
  assert_eq!(
    compute(&mut memory),
    Err(Fault::UnknownOpcode {
      opcode: 0x09,
      address: MEMORY_SHIFT
    })
  );
  assert_eq!(memory[0], 0xaa);
}

#[test]
fn writes_before_a_fault_persist() {
  let mut memory = load_image(&assemble(
    "
    load r1 1
    store r1 0
    load r2 9
    halt",
  ));
  memory[1] = 77;
  assert_eq!(
    compute(&mut memory),
    Err(Fault::OutOfRange {
      address: 9,
      region: Region::Data
    })
  );
  assert_eq!(memory[0], 77);
}

#[test]
fn missing_halt_runs_into_zero_opcode() {
  let mut memory = load_image(&assemble("load r1 0"));
  assert_eq!(
    compute(&mut memory),
    Err(Fault::UnknownOpcode {
      opcode: 0x00,
      address: MEMORY_SHIFT + 3
    })
  );
}

#[test]
fn runaway_program_hits_step_limit() {
  let config = VmConfig::default()
    .with_instruction_set(InstructionSet::Extended)
    .with_step_limit(500);
  let mut memory = load_image(&assemble(
    "
    addi r1 1
    jump 8",
  ));
  assert_eq!(
    compute_with(&mut memory, &config),
    Err(Fault::StepLimitExceeded { limit: 500 })
  );
}
