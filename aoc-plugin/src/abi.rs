//! C ABI between the runner and compiled solver libraries
//!
//! Every solver symbol is a `#[repr(C)]` [`SolverDecl`] static. Its header (a
//! magic tag and an ABI version) lets the runner reject symbols that merely
//! share the naming convention. Answers and failures cross the boundary as
//! UTF-8 bytes handed to an [`OutcomeSink`] callback, so no allocation ever
//! changes hands between the two allocators.

use crate::alloc_counter::{self, AllocStats};
use crate::error::SignatureMismatch;
use crate::module::SolverFn;
use std::any::Any;
use std::ffi::c_void;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

/// Tag stored at the start of every declaration
pub const SIGNATURE: u64 = u64::from_le_bytes(*b"aocsolvr");

/// Current declaration layout version
pub const ABI_VERSION: u32 = 1;

/// Entry point: input bytes in, exactly one sink write out
pub type SolveFn = unsafe extern "C" fn(input: *const u8, len: usize, sink: *mut OutcomeSink);

/// Allocation counter snapshot of the library's allocator
pub type AllocStatsFn = extern "C" fn() -> AllocStats;

/// An exported solver
#[repr(C)]
pub struct SolverDecl {
    pub signature: u64,
    pub abi_version: u32,
    pub solve: SolveFn,
    pub alloc_stats: AllocStatsFn,
}

impl SolverDecl {
    /// Declaration for `solve`, tagged with the current signature and version
    pub const fn new(solve: SolveFn) -> Self {
        Self {
            signature: SIGNATURE,
            abi_version: ABI_VERSION,
            solve,
            alloc_stats: alloc_counter::snapshot_extern,
        }
    }

    /// Validate the header behind a raw symbol address
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to at least 12 readable bytes that stay
    /// valid for `'a`. If the header matches, the whole declaration must be
    /// valid for `'a`.
    pub unsafe fn from_symbol<'a>(ptr: *const SolverDecl) -> Result<&'a SolverDecl, SignatureMismatch> {
        if ptr.is_null() {
            return Err(SignatureMismatch::Null);
        }

        let signature = unsafe { ptr::read_unaligned(ptr::addr_of!((*ptr).signature)) };
        if signature != SIGNATURE {
            return Err(SignatureMismatch::NotADeclaration(signature));
        }

        let found = unsafe { ptr::read_unaligned(ptr::addr_of!((*ptr).abi_version)) };
        if found != ABI_VERSION {
            return Err(SignatureMismatch::Version {
                found,
                expected: ABI_VERSION,
            });
        }

        if !ptr.is_aligned() {
            return Err(SignatureMismatch::Misaligned);
        }

        Ok(unsafe { &*ptr })
    }
}

/// Callback through which a solver reports its single outcome
#[repr(C)]
pub struct OutcomeSink {
    ctx: *mut c_void,
    write: unsafe extern "C" fn(ctx: *mut c_void, ok: bool, text: *const u8, len: usize),
}

type Slot = Option<Result<String, String>>;

unsafe extern "C" fn write_outcome(ctx: *mut c_void, ok: bool, text: *const u8, len: usize) {
    let slot = unsafe { &mut *ctx.cast::<Slot>() };
    let bytes = if text.is_null() {
        &[][..]
    } else {
        unsafe { std::slice::from_raw_parts(text, len) }
    };
    let text = String::from_utf8_lossy(bytes).into_owned();
    *slot = Some(if ok { Ok(text) } else { Err(text) });
}

/// Host-side handle calling a validated declaration
#[derive(Clone, Copy)]
pub struct DeclaredSolver<'a> {
    decl: &'a SolverDecl,
}

impl<'a> DeclaredSolver<'a> {
    pub fn new(decl: &'a SolverDecl) -> Self {
        Self { decl }
    }
}

impl SolverFn for DeclaredSolver<'_> {
    fn solve(&self, input: &str) -> Result<String, String> {
        let mut slot: Slot = None;
        let mut sink = OutcomeSink {
            ctx: ptr::addr_of_mut!(slot).cast(),
            write: write_outcome,
        };
        unsafe { (self.decl.solve)(input.as_ptr(), input.len(), &mut sink) };
        slot.unwrap_or_else(|| Err("solver reported no outcome".to_string()))
    }

    fn alloc_stats(&self) -> AllocStats {
        (self.decl.alloc_stats)()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("solver panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("solver panicked: {}", s)
    } else {
        "solver panicked".to_string()
    }
}

/// Plugin-side body of a generated solve entry point
///
/// Runs `solve` on the input, catching panics, and writes the outcome to the
/// sink.
///
/// # Safety
///
/// `input` must point to `len` readable bytes and `sink` must be null or
/// point to a live [`OutcomeSink`] provided by the runner.
pub unsafe fn dispatch<T, E>(
    input: *const u8,
    len: usize,
    sink: *mut OutcomeSink,
    solve: fn(&str) -> Result<T, E>,
) where
    T: Display,
    E: Display,
{
    let bytes = if input.is_null() {
        &[][..]
    } else {
        unsafe { std::slice::from_raw_parts(input, len) }
    };

    let outcome = match std::str::from_utf8(bytes) {
        Ok(text) => panic::catch_unwind(AssertUnwindSafe(|| {
            solve(text)
                .map(|answer| answer.to_string())
                .map_err(|e| e.to_string())
        }))
        .unwrap_or_else(|payload| Err(panic_message(payload.as_ref()))),
        Err(e) => Err(format!("input is not valid UTF-8: {}", e)),
    };

    let Some(sink) = (unsafe { sink.as_ref() }) else {
        return;
    };
    let (ok, text) = match &outcome {
        Ok(answer) => (true, answer),
        Err(message) => (false, message),
    };
    unsafe { (sink.write)(sink.ctx, ok, text.as_ptr(), text.len()) };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_lines(input: &str) -> Result<usize, String> {
        Ok(input.lines().count())
    }

    fn always_fails(_input: &str) -> Result<u8, &'static str> {
        Err("not implemented")
    }

    fn panics(_input: &str) -> Result<u8, String> {
        panic!("boom")
    }

    unsafe extern "C" fn count_lines_entry(input: *const u8, len: usize, sink: *mut OutcomeSink) {
        unsafe { dispatch(input, len, sink, count_lines) }
    }

    unsafe extern "C" fn fails_entry(input: *const u8, len: usize, sink: *mut OutcomeSink) {
        unsafe { dispatch(input, len, sink, always_fails) }
    }

    unsafe extern "C" fn panics_entry(input: *const u8, len: usize, sink: *mut OutcomeSink) {
        unsafe { dispatch(input, len, sink, panics) }
    }

    static COUNT_LINES: SolverDecl = SolverDecl::new(count_lines_entry);
    static FAILS: SolverDecl = SolverDecl::new(fails_entry);
    static PANICS: SolverDecl = SolverDecl::new(panics_entry);
    static NOT_A_SOLVER: [u64; 4] = [42, 0, 0, 0];

    #[test]
    fn test_answer_crosses_boundary() {
        let decl = unsafe { SolverDecl::from_symbol(&COUNT_LINES) }.unwrap();
        let solver = DeclaredSolver::new(decl);
        assert_eq!(solver.solve("a\nb\nc\n"), Ok("3".to_string()));
    }

    #[test]
    fn test_failure_crosses_boundary() {
        let solver = DeclaredSolver::new(&FAILS);
        assert_eq!(solver.solve(""), Err("not implemented".to_string()));
    }

    #[test]
    fn test_panic_becomes_failure() {
        let solver = DeclaredSolver::new(&PANICS);
        assert_eq!(solver.solve("x"), Err("solver panicked: boom".to_string()));
    }

    #[test]
    fn test_foreign_symbol_rejected() {
        let ptr = NOT_A_SOLVER.as_ptr().cast::<SolverDecl>();
        let result = unsafe { SolverDecl::from_symbol(ptr) };
        assert!(matches!(result, Err(SignatureMismatch::NotADeclaration(42))));
    }

    #[test]
    fn test_null_symbol_rejected() {
        let result = unsafe { SolverDecl::from_symbol(ptr::null()) };
        assert!(matches!(result, Err(SignatureMismatch::Null)));
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let words: [u64; 4] = [SIGNATURE, u64::from(ABI_VERSION + 1), 0, 0];
        let result = unsafe { SolverDecl::from_symbol(words.as_ptr().cast()) };
        assert!(matches!(
            result,
            Err(SignatureMismatch::Version { found, expected }) if found == ABI_VERSION + 1 && expected == ABI_VERSION
        ));
    }
}
