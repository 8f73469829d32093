use crate::path::parser::parse;
use crate::{CompiledPath, PathOp};

#[test]
fn parse_is_deterministic() {
    let d = "M10,10 L20,20 C10,0 20,20 0,20 Z";
    assert_eq!(parse(d), parse(d));
}

#[test]
fn empty_input_parses_to_an_empty_path() {
    let p = parse("");
    assert!(p.is_empty());
    assert!(!p.failed());
    assert!(!p.is_drawable());
}

#[test]
fn consecutive_moves_collapse_to_the_final_position() {
    let p = parse("M20,20 10,10");
    assert!(!p.failed());
    assert_eq!(p.ops(), &[PathOp::Move]);
    assert_eq!(p.points(), &[10.0, 10.0]);
    assert!(!p.is_drawable());
}

#[test]
fn a_dead_move_before_a_drawing_command_is_dropped() {
    let p = parse("M1,1 M2,2 L10,0");
    assert_eq!(p.ops(), &[PathOp::Move, PathOp::Line]);
    assert_eq!(p.points(), &[2.0, 2.0, 10.0, 0.0]);
}

#[test]
fn relative_commands_expand_against_the_pen() {
    let p = parse("m5,5 l10,0 l0,10");
    assert_eq!(p.ops(), &[PathOp::Move, PathOp::Line, PathOp::Line]);
    assert_eq!(p.points(), &[5.0, 5.0, 15.0, 5.0, 15.0, 15.0]);
}

#[test]
fn horizontal_and_vertical_lines_synthesize_the_missing_coordinate() {
    let p = parse("M3,4 h10 v-2 H0 V9");
    assert_eq!(
        p.ops(),
        &[
            PathOp::Move,
            PathOp::Line,
            PathOp::Line,
            PathOp::Line,
            PathOp::Line
        ]
    );
    assert_eq!(
        p.points(),
        &[3.0, 4.0, 13.0, 4.0, 13.0, 2.0, 0.0, 2.0, 0.0, 9.0]
    );
}

#[test]
fn implicit_repetition_continues_the_previous_command() {
    let p = parse("M0,0 L10,0 20,0 30,0");
    assert_eq!(
        p.ops(),
        &[PathOp::Move, PathOp::Line, PathOp::Line, PathOp::Line]
    );
    assert!(!p.failed());
}

#[test]
fn smooth_cubic_mirrors_the_previous_control_point() {
    let p = parse("M0,0 C0,10 10,10 10,0 S20,-10 20,0");
    assert_eq!(p.ops(), &[PathOp::Move, PathOp::Cubic, PathOp::Cubic]);
    // Mirror of (10,10) through (10,0) is (10,-10).
    assert_eq!(
        &p.points()[8..],
        &[10.0, -10.0, 20.0, -10.0, 20.0, 0.0]
    );
}

#[test]
fn smooth_cubic_after_a_non_cubic_collapses_to_the_pen() {
    let p = parse("M1,2 S10,10 20,0");
    assert_eq!(p.ops(), &[PathOp::Move, PathOp::Cubic]);
    assert_eq!(&p.points()[2..4], &[1.0, 2.0]);
}

#[test]
fn smooth_quadratic_mirrors_only_after_a_quadratic() {
    let p = parse("M0,0 Q5,10 10,0 T20,0");
    assert_eq!(p.ops(), &[PathOp::Move, PathOp::Quad, PathOp::Quad]);
    // Mirror of (5,10) through (10,0) is (15,-10).
    assert_eq!(&p.points()[6..], &[15.0, -10.0, 20.0, 0.0]);

    let collapsed = parse("M0,0 L5,5 T20,0");
    assert_eq!(&collapsed.points()[4..6], &[5.0, 5.0]);
}

#[test]
fn arcs_are_stored_atomically_with_seven_parameters() {
    let p = parse("M0,0 a10,5 30 1 0 20,0");
    assert_eq!(p.ops(), &[PathOp::Move, PathOp::Arc]);
    assert_eq!(&p.points()[2..], &[10.0, 5.0, 30.0, 1.0, 0.0, 20.0, 0.0]);
}

#[test]
fn a_run_of_close_commands_emits_a_single_close() {
    let p = parse("M0,0 L10,0 Z z Z");
    assert_eq!(p.ops(), &[PathOp::Move, PathOp::Line, PathOp::Close]);
    assert!(!p.failed());
}

#[test]
fn unrecognized_letter_stops_parsing_and_keeps_the_partial_result() {
    let p = parse("M10,10 L20,20 X5,5 L30,30");
    assert!(p.failed());
    assert_eq!(p.ops(), &[PathOp::Move, PathOp::Line]);
    assert_eq!(p.points(), &[10.0, 10.0, 20.0, 20.0]);
}

#[test]
fn missing_required_argument_is_a_failure_at_that_point() {
    let p = parse("M10,10 L20");
    assert!(p.failed());
    assert_eq!(p.ops(), &[PathOp::Move]);

    let bare = parse("L");
    assert!(bare.failed());
    assert!(bare.is_empty());
}

#[test]
fn numbers_without_a_governing_command_fail() {
    let p = parse("10 20");
    assert!(p.failed());
    assert!(p.is_empty());
}

#[test]
fn packed_number_grammar_splits_inside_commands() {
    let p = parse("M0.5.5 1-2");
    assert_eq!(p.ops(), &[PathOp::Move]);
    assert_eq!(p.points(), &[1.0, -2.0]);
}

#[test]
fn svg_string_output_reparses_to_the_same_path() {
    let p = parse("M10,10 L20,20 Q10,10 20,0 C10,20 20,-20 30,0 A5,5 0 0 1 40,0 Z");
    let round = parse(&p.to_svg_string());
    assert_eq!(p, round);
}

#[test]
fn from_parts_rejects_mismatched_point_counts() {
    assert!(CompiledPath::from_parts(vec![PathOp::Move], vec![1.0, 2.0]).is_some());
    assert!(CompiledPath::from_parts(vec![PathOp::Cubic], vec![1.0, 2.0]).is_none());
}

#[test]
fn only_move_and_close_is_not_drawable() {
    assert!(!parse("M5,5 Z").is_drawable());
    assert!(parse("M5,5 L6,6").is_drawable());
}
