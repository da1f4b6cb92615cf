/**
 * Variadic Pipe Tests
 *
 * Pipes with more than four arguments are rewritten into their variadic form.
 */

#[path = "utils/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::*;
    use angular_template_pipeline::ir::{self, CompatibilityMode, Op};
    use angular_template_pipeline::output::output_ast as o;
    use angular_template_pipeline::{
        create_pipes, create_variadic_pipes, run_pipe_phases, ComponentCompilationJob,
    };

    fn args(count: usize) -> Vec<o::Expression> {
        (0..count).map(|i| var(&format!("arg{i}"))).collect()
    }

    fn binding_of(job: &ComponentCompilationJob) -> &o::Expression {
        let op = job.root.update.iter().next().expect("one update op");
        let property = op
            .as_any()
            .downcast_ref::<ir::PropertyOp>()
            .expect("a property op");
        match &property.expression {
            ir::BindingExpression::Expression(expr) => expr,
            other => panic!("unexpected binding {other:?}"),
        }
    }

    #[test]
    fn should_convert_pipes_with_more_than_four_arguments() {
        let mut job = ComponentCompilationJob::new("TestCmp", CompatibilityMode::Normal);
        job.root.update.push(property(1, pipe(10, "many", args(5))));

        create_variadic_pipes(&mut job);

        match binding_of(&job) {
            o::Expression::PipeBindingVariadic(pipe) => {
                assert_eq!(pipe.num_args, 5);
                assert_eq!(pipe.name, "many");
                assert_eq!(pipe.target, xref(10));
                match pipe.args.as_ref() {
                    o::Expression::LiteralArray(arr) => assert_eq!(arr.entries.len(), 5),
                    other => panic!("expected a literal array, got {other:?}"),
                }
            }
            other => panic!("expected a variadic pipe, got {other:?}"),
        }
    }

    #[test]
    fn should_keep_pipes_with_four_arguments() {
        let mut job = ComponentCompilationJob::new("TestCmp", CompatibilityMode::Normal);
        job.root.update.push(property(1, pipe(10, "four", args(4))));

        create_variadic_pipes(&mut job);

        match binding_of(&job) {
            o::Expression::PipeBinding(pipe) => assert_eq!(pipe.args.len(), 4),
            other => panic!("expected a fixed-arity pipe, got {other:?}"),
        }
    }

    #[test]
    fn should_convert_nested_pipes() {
        let mut job = ComponentCompilationJob::new("TestCmp", CompatibilityMode::Normal);
        let mut outer_args = args(4);
        outer_args.insert(0, pipe(10, "inner", args(6)));
        job.root.update.push(property(1, pipe(11, "outer", outer_args)));

        create_variadic_pipes(&mut job);

        let outer = match binding_of(&job) {
            o::Expression::PipeBindingVariadic(pipe) => pipe,
            other => panic!("expected a variadic pipe, got {other:?}"),
        };
        assert_eq!(outer.num_args, 5);
        let entries = match outer.args.as_ref() {
            o::Expression::LiteralArray(arr) => &arr.entries,
            other => panic!("expected a literal array, got {other:?}"),
        };
        assert!(matches!(
            &entries[0],
            o::Expression::PipeBindingVariadic(inner) if inner.num_args == 6
        ));
    }

    #[test]
    fn should_produce_same_creation_block_in_either_phase_order() -> anyhow::Result<()> {
        let build = || {
            let mut job =
                ComponentCompilationJob::new("TestCmp", CompatibilityMode::TemplateDefinitionBuilder);
            job.root.create.push_all([element(1), element(2)]);
            job.root.update.push(property(1, pipe(10, "many", args(5))));
            job.root.update.push(property(2, pipe(11, "few", args(1))));
            job
        };

        let mut forward = build();
        run_pipe_phases(&mut forward)?;

        let mut reverse = build();
        create_variadic_pipes(&mut reverse);
        create_pipes(&mut reverse)?;

        let expected = vec![
            "ElementStart(1)",
            "Pipe(10, many)",
            "ElementStart(2)",
            "Pipe(11, few)",
        ];
        assert_eq!(create_summary(&forward.root.create), expected);
        assert_eq!(create_summary(&reverse.root.create), expected);
        assert!(matches!(
            binding_of(&forward),
            o::Expression::PipeBindingVariadic(_)
        ));
        Ok(())
    }
}
