//! `gx-vm` — host command-line wrapper around the `gxvm_core` pipeline (spec §6).
//! Argument parsing, file I/O, and human-readable diagnostics live here; the core
//! crate performs none of it.

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use gxvm_core::decode::{decode, Opcode};
use gxvm_core::graph::Graph;
use gxvm_core::loader;
use gxvm_core::pipeline::{Pipeline, Status};

#[derive(Parser)]
#[command(name = "gx-vm", about = "GX-VM instruction-set simulator")]
struct Args {
    /// Program binary to load and run.
    program: String,

    /// Emit a structured per-instruction trace at TRACE level.
    #[arg(long)]
    debug: bool,

    /// Abort with an error after this many executed instructions.
    #[arg(long)]
    max_instructions: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let bytes = match fs::read(&args.program) {
        Ok(b) => b,
        Err(e) => {
            log::error!("failed to read {}: {e}", args.program);
            return ExitCode::FAILURE;
        }
    };

    let mut graph_storage: Option<Graph> = None;
    let vm = match loader::load(&bytes, &mut graph_storage) {
        Ok(vm) => vm,
        Err(e) => {
            log::error!("failed to load {}: {e}", args.program);
            return ExitCode::FAILURE;
        }
    };

    let mut pipeline = Pipeline {
        vm,
        debug_hook: None,
        exit_hook: None,
    };

    if args.debug {
        pipeline.debug_hook = Some(Box::new(|vm| {
            log::trace!(
                "pc={} flags={:03b} niter={:?} eiter={} r_node={} r_nbr={} r_val={} r_acc={} frontier_len={} next_frontier_len={}",
                vm.pc,
                vm.flags,
                vm.niter,
                vm.eiter,
                vm.r[gxvm_core::R_NODE as usize],
                vm.r[gxvm_core::R_NBR as usize],
                vm.r[gxvm_core::R_VAL as usize],
                vm.r[gxvm_core::R_ACC as usize],
                vm.frontier.len(),
                vm.next_frontier.len(),
            );
        }));
    }

    pipeline.exit_hook = Some(Box::new(|vm, status| {
        if let Status::Error(kind) = status {
            let faulting_pc = vm.pc.saturating_sub(1);
            let raw = vm.program[faulting_pc as usize];
            let mnemonic = decode(raw)
                .map(|d| d.opcode.name())
                .unwrap_or(Opcode::Halt.name());
            eprintln!(
                "gx-vm: fault at pc={faulting_pc} word=0x{raw:016x} opcode={mnemonic}: {kind}"
            );
        }
    }));

    let status = pipeline.run(args.max_instructions);
    match status {
        Status::Halt => {
            println!("gx-vm: halted after {} instructions", pipeline.vm.clock);
            ExitCode::SUCCESS
        }
        Status::Error(_) => ExitCode::FAILURE,
        Status::Continue => unreachable!("run() never returns Continue"),
    }
}
