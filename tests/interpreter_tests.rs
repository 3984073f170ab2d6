// Tests for the executor: dictionary bindings, counted loops, error recovery and printed output.

use snakeforth::runtime::built_ins::register_builtin_words;
use snakeforth::runtime::data_structures::output::CapturedOutput;
use snakeforth::runtime::data_structures::value::Value;
use snakeforth::runtime::error::ErrorKind;
use snakeforth::runtime::interpreter::forth_interpreter::{ForthInterpreter, MAX_CALL_DEPTH};
use snakeforth::runtime::interpreter::{
    CodeManagement, Interpreter, InterpreterStack, LoopManagement,
};
use test_case::test_case;

fn new_interpreter() -> (ForthInterpreter, CapturedOutput) {
    let output = CapturedOutput::new();
    let mut interp = ForthInterpreter::with_output(Box::new(output.clone()));

    register_builtin_words(&mut interp).unwrap();
    (interp, output)
}

fn int_stack(interp: &ForthInterpreter) -> Vec<i64> {
    interp.stack().iter().map(|v| v.get_int_val()).collect()
}

/// Run the source and hand back the stack and everything printed.
fn run(source: &str) -> (Vec<i64>, String) {
    let (mut interp, output) = new_interpreter();

    interp.process_source("<test>", source).unwrap();
    (int_stack(&interp), output.contents())
}

#[test]
fn variables_and_constants() {
    let (mut interp, _) = new_interpreter();

    interp.process_source("<test>", "variable v").unwrap();
    interp.process_source("<test>", "10 v !").unwrap();
    interp.process_source("<test>", "v @").unwrap();
    assert_eq!(int_stack(&interp), vec![10]);

    interp.process_source("<test>", "20 constant k").unwrap();
    interp.process_source("<test>", "k").unwrap();
    assert_eq!(int_stack(&interp), vec![10, 20]);
}

#[test]
fn variables_start_at_zero_and_never_share_addresses() {
    let (stack, _) = run("variable a variable b a b b @");
    assert_eq!(stack, vec![0, 1, 0]);
}

#[test]
fn variable_name_collision_keeps_the_old_binding() {
    let (mut interp, output) = new_interpreter();

    interp
        .process_source("<test>", "variable v 5 v ! variable v v @")
        .unwrap();

    assert_eq!(int_stack(&interp), vec![5]);
    assert!(output.contents().contains("Variable name v is already taken."));
    assert_eq!(interp.variables().len(), 1);
}

#[test]
fn constant_name_collision_leaves_the_stack_alone() {
    let (mut interp, output) = new_interpreter();

    interp
        .process_source("<test>", "7 constant seven 8 constant seven seven")
        .unwrap();

    assert_eq!(int_stack(&interp), vec![8, 7]);
    assert!(output.contents().contains("Constant name seven is already taken."));
}

#[test]
fn constant_keeps_floats() {
    let (mut interp, _) = new_interpreter();

    interp.process_source("<test>", "2.5 constant half half").unwrap();
    assert_eq!(interp.stack(), &vec![Value::Float(2.5)]);
}

#[test]
fn variables_defined_inside_a_word() {
    let (mut interp, output) = new_interpreter();

    interp
        .process_source("<test>", ": make variable counter ; make 7 counter ! counter @")
        .unwrap();
    assert_eq!(int_stack(&interp), vec![7]);

    interp.process_source("<test>", "make").unwrap();
    assert!(output.contents().contains("Variable name counter is already taken."));
}

#[test]
fn redefinition_replaces_the_whole_word() {
    let (mut interp, output) = new_interpreter();

    interp.process_source("<test>", ": f 1 2 ; : f 3 ; f").unwrap();

    assert_eq!(int_stack(&interp), vec![3]);
    assert!(output.contents().contains("redefined f"));
}

#[test]
fn redefinition_is_seen_by_existing_callers() {
    let (stack, _) = run(": a 1 ; : b a ; : a 2 ; b");
    assert_eq!(stack, vec![2]);
}

#[test]
fn builtins_can_be_redefined() {
    let (stack, output) = run(": dup 99 ; 1 dup");

    assert_eq!(stack, vec![1, 99]);
    assert!(output.contains("redefined dup"));
}

#[test]
fn unknown_word_does_not_stop_the_line() {
    let (mut interp, output) = new_interpreter();

    interp.process_source("<test>", "1 frobnicate 2").unwrap();
    interp.process_source("<test>", "3").unwrap();

    assert_eq!(int_stack(&interp), vec![1, 2, 3]);
    assert!(output.contents().contains("<test> (1, 3): Unknown word frobnicate."));
}

#[test]
fn unknown_word_inside_a_definition_is_reported_when_run() {
    let (mut interp, output) = new_interpreter();

    interp.process_source("<test>", ": f 1 mystery 2 ;").unwrap();
    assert!(output.contents().is_empty());

    interp.process_source("<test>", "f").unwrap();

    assert_eq!(int_stack(&interp), vec![1, 2]);
    assert!(output.contents().contains("Unknown word mystery."));
}

#[test]
fn stack_underflow_aborts_the_line() {
    let (mut interp, _) = new_interpreter();

    let error = interp.process_source("<test>", "1 + 2").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::StackUnderflow);
    assert!(error.error().contains("calling +"));
    assert!(error.error().contains("stack: [1]"));
    assert_eq!(int_stack(&interp), vec![1]);

    // The session carries on with the next line.
    interp.process_source("<test>", "2 +").unwrap();
    assert_eq!(int_stack(&interp), vec![3]);
}

#[test]
fn stack_underflow_inside_a_word_aborts_every_caller() {
    let (mut interp, _) = new_interpreter();

    let error = interp
        .process_source("<test>", ": inner drop drop drop ; : outer 1 inner 2 ; 5 outer 6")
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::StackUnderflow);
    assert!(int_stack(&interp).is_empty());
}

#[test_case(": t if 1 then ; t", "Stack underflow calling if, needs 1, stack: [].", &[]; "if")]
#[test_case(": t begin until ; t", "Stack underflow calling until, needs 1, stack: [].", &[]; "until")]
#[test_case(": t begin while repeat ; t", "Stack underflow calling while, needs 1, stack: [].", &[]; "while")]
#[test_case(": t 5 do i loop ; t", "Stack underflow calling do, needs 2, stack: [5].", &[5]; "do keeps its bound")]
#[test_case(": t 3 0 do +loop ; t", "Stack underflow calling +loop, needs 1, stack: [].", &[]; "plus loop step")]
#[test_case("constant k", "Stack underflow calling constant, needs 1, stack: [].", &[]; "constant")]
fn control_word_underflow_names_the_word(source: &str, message: &str, remaining: &[i64]) {
    let (mut interp, _) = new_interpreter();

    let error = interp.process_source("<test>", source).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::StackUnderflow);
    assert_eq!(error.error(), message);
    assert_eq!(int_stack(&interp), remaining);
}

#[test]
fn failing_native_restores_its_arguments() {
    let (mut interp, _) = new_interpreter();

    let error = interp.process_source("<test>", "10 0 /").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::DivisionByZero);
    assert_eq!(int_stack(&interp), vec![10, 0]);
}

#[test]
fn interpret_reports_the_aborting_error() {
    let (mut interp, output) = new_interpreter();

    assert!(interp.interpret("<repl>", "drop").is_err());
    assert!(output.contents().starts_with("<repl> (1, 1): Stack underflow calling drop"));
}

#[test_case("1 ( a comment ) 2", &[1, 2]; "comment")]
#[test_case("1 ( outer ( inner ) still outer ) 2", &[1, 2]; "nested comment")]
#[test_case("1 \\ 2 3\n4", &[1, 4]; "line comment")]
#[test_case("1 ( spans\nlines ) 2", &[1, 2]; "comment over lines")]
fn comments(source: &str, expected: &[i64]) {
    assert_eq!(run(source).0, expected);
}

#[test_case("1 2 . .", "2 1 "; "print values")]
#[test_case("1.5 .", "1.5 "; "print float")]
#[test_case("2.0 .", "2.0 "; "print whole float")]
#[test_case("65 emit 66 emit cr", "AB\n"; "emit and cr")]
#[test_case("1 2 .s", "<2> 1 2\n"; "print stack")]
#[test_case(".s", "<0> \n"; "print empty stack")]
#[test_case(".\" Hello World\"", "hello world\n"; "string literal is lower cased")]
#[test_case(".\" done\" 1 .", "done\n1 "; "string literal then more")]
fn printed_output(source: &str, expected: &str) {
    assert_eq!(run(source).1, expected);
}

#[test]
fn print_stack_leaves_the_stack() {
    assert_eq!(run("1 2 .s").0, vec![1, 2]);
}

#[test_case(": up 5 0 do i loop ; up", &[0, 1, 2, 3, 4]; "counts up")]
#[test_case(": none 3 3 do i loop ; none", &[]; "equal bounds run zero times")]
#[test_case(": none 0 3 do i loop ; none", &[]; "start past limit runs zero times")]
#[test_case(": evens 10 0 do i 2 +loop ; evens", &[0, 2, 4, 6, 8]; "plus loop")]
#[test_case(": countdown 1 5 do i -1 +loop ; countdown", &[5, 4, 3, 2, 1]; "negative step")]
#[test_case(": grid 2 0 do 3 0 do j i loop loop ; grid", &[0, 0, 0, 1, 0, 2, 1, 0, 1, 1, 1, 2]; "nested loops")]
#[test_case(": show-i i ; : outer 3 0 do show-i loop ; outer", &[0, 1, 2]; "index seen by called words")]
#[test_case(": sum 0 5 1 do i + loop ; sum", &[10]; "accumulate")]
#[test_case(": found 10 0 do i dup 3 > if exit then drop loop 99 ; found", &[4]; "exit leaves the word")]
#[test_case(": nest dup if dup 1 - 1 0 do recurse loop then ; 3 nest", &[3, 2, 1, 0]; "recurse re-enters the word")]
fn counted_loops(source: &str, expected: &[i64]) {
    assert_eq!(run(source).0, expected);
}

#[test]
fn loop_state_is_cleared_after_an_error() {
    let (mut interp, _) = new_interpreter();

    assert!(interp.process_source("<test>", ": bad 3 0 do drop loop ; bad").is_err());
    assert_eq!(interp.loop_depth(), 0);

    interp.process_source("<test>", ": up 2 0 do i loop ; up").unwrap();
    assert_eq!(int_stack(&interp), vec![0, 1]);
}

#[test]
fn loop_bounds_must_be_integers() {
    let (mut interp, _) = new_interpreter();

    let error = interp
        .process_source("<test>", ": f 1.5 0 do loop ; f")
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::TypeMismatch);
    assert_eq!(interp.stack(), &vec![Value::Float(1.5), Value::Int(0)]);
}

#[test]
fn loop_and_plus_loop_differ_on_an_empty_range() {
    // `loop` checks the bounds before the first pass, `+loop` only skips equal bounds.
    assert_eq!(run(": f 0 10 do i loop ; f").0, Vec::<i64>::new());
    assert_eq!(run(": f 0 10 do i 1 +loop ; f").0, vec![10]);
    assert_eq!(run(": f 5 5 do i 1 +loop ; f").0, Vec::<i64>::new());
}

#[test]
fn deep_recursion_within_the_limit() {
    let (mut interp, _) = new_interpreter();
    let source = format!(": deep dup 0 > if 1 - deep then ; {} deep", MAX_CALL_DEPTH - 10);

    interp.process_source("<test>", &source).unwrap();
    assert_eq!(int_stack(&interp), vec![0]);
}

#[test]
fn runaway_recursion_is_stopped() {
    let (mut interp, _) = new_interpreter();

    let error = interp
        .process_source("<test>", ": forever recurse ; forever")
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::CallDepthExceeded);

    // The depth is unwound, so calls work again afterwards.
    interp.process_source("<test>", ": two 2 ; two").unwrap();
    assert_eq!(int_stack(&interp), vec![2]);
}

#[test]
fn words_lists_the_dictionary() {
    let (_, output) = run(": square dup * ; words");

    assert!(output.contains("square"));
    assert!(output.contains("compiled"));
    assert!(output.contains("native"));
}

#[test]
fn see_shows_the_compiled_code() {
    let (_, output) = run(": guard if 100 then ; see guard");

    assert!(output.starts_with(": guard\n"));
    assert!(output.contains("JumpIfZero        1"));
    assert!(output.contains("Execute           100"));
}

#[test]
fn reset_clears_the_stack_but_keeps_words() {
    let (mut interp, _) = new_interpreter();

    interp.process_source("<test>", ": one 1 ; 1 2 3").unwrap();
    interp.reset();
    assert!(interp.stack().is_empty());

    interp.process_source("<test>", "one").unwrap();
    assert_eq!(int_stack(&interp), vec![1]);
}

