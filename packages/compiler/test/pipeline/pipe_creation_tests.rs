/**
 * Pipe Creation Tests
 *
 * Exercises the pipe creation phase over hand-built compilation jobs in both ordering modes.
 */

#[path = "utils/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::*;
    use angular_template_pipeline::ir::{self, CompatibilityMode};
    use angular_template_pipeline::output::output_ast as o;
    use angular_template_pipeline::{
        create_pipes, CompilationJob, CompilerError, ComponentCompilationJob,
        HostBindingCompilationJob, InternalError, PipelineConfig,
    };

    fn normal_job() -> ComponentCompilationJob {
        ComponentCompilationJob::new("TestCmp", CompatibilityMode::Normal)
    }

    fn compat_job() -> ComponentCompilationJob {
        ComponentCompilationJob::new("TestCmp", CompatibilityMode::TemplateDefinitionBuilder)
    }

    fn internal(err: CompilerError) -> InternalError {
        match err {
            CompilerError::Internal(internal) => internal,
            other => panic!("expected an internal error, got {other}"),
        }
    }

    #[test]
    fn should_leave_units_without_pipes_unchanged() -> anyhow::Result<()> {
        let mut job = compat_job();
        job.root.create.push_all([element(1), element_end(1)]);
        job.root.update.push(property(1, var("value")));

        create_pipes(&mut job)?;

        assert_eq!(
            create_summary(&job.root.create),
            vec!["ElementStart(1)", "ElementEnd(1)"]
        );
        Ok(())
    }

    #[test]
    fn should_append_pipe_after_target_in_normal_mode() -> anyhow::Result<()> {
        let mut job = normal_job();
        job.root.create.push(element(1));
        job.root
            .update
            .push(property(1, pipe(10, "upper", vec![var("name")])));

        create_pipes(&mut job)?;

        assert_eq!(
            create_summary(&job.root.create),
            vec!["ElementStart(1)", "Pipe(10, upper)"]
        );
        Ok(())
    }

    #[test]
    fn should_append_in_processing_order_regardless_of_target() -> anyhow::Result<()> {
        let mut job = normal_job();
        job.root
            .create
            .push_all([element(1), element_end(1), element(2), element_end(2)]);
        job.root.update.push(property(2, pipe(10, "first", vec![var("a")])));
        job.root.update.push(property(1, pipe(11, "second", vec![var("b")])));

        create_pipes(&mut job)?;

        assert_eq!(
            create_summary(&job.root.create),
            vec![
                "ElementStart(1)",
                "ElementEnd(1)",
                "ElementStart(2)",
                "ElementEnd(2)",
                "Pipe(10, first)",
                "Pipe(11, second)",
            ]
        );
        Ok(())
    }

    #[test]
    fn should_chain_pipes_on_the_same_anchor_in_compatibility_mode() -> anyhow::Result<()> {
        let mut job = compat_job();
        job.root.create.push_all([element(1), element(2)]);
        job.root.update.push(property(1, pipe(10, "a", vec![var("x")])));
        job.root.update.push(property(1, pipe(11, "b", vec![var("y")])));

        create_pipes(&mut job)?;

        assert_eq!(
            create_summary(&job.root.create),
            vec!["ElementStart(1)", "Pipe(10, a)", "Pipe(11, b)", "ElementStart(2)"]
        );
        Ok(())
    }

    #[test]
    fn should_place_pipes_directly_after_their_anchor() -> anyhow::Result<()> {
        let mut job = compat_job();
        job.root
            .create
            .push_all([element(1), element_end(1), text(2), element(3), element_end(3)]);
        job.root.update.push(interpolate_text(2, pipe(10, "date", vec![var("now")])));
        job.root.update.push(property(1, pipe(11, "async", vec![var("stream")])));
        job.root.update.push(property(3, pipe(12, "json", vec![var("obj")])));

        create_pipes(&mut job)?;

        assert_eq!(
            create_summary(&job.root.create),
            vec![
                "ElementStart(1)",
                "Pipe(11, async)",
                "ElementEnd(1)",
                "Text(2)",
                "Pipe(10, date)",
                "ElementStart(3)",
                "Pipe(12, json)",
                "ElementEnd(3)",
            ]
        );
        Ok(())
    }

    #[test]
    fn should_place_pipe_at_end_when_anchor_is_last() -> anyhow::Result<()> {
        let mut job = compat_job();
        job.root.create.push(element(1));
        job.root.update.push(property(1, pipe(10, "upper", vec![var("a")])));
        job.root.update.push(property(1, pipe(11, "lower", vec![var("b")])));

        create_pipes(&mut job)?;

        assert_eq!(
            create_summary(&job.root.create),
            vec!["ElementStart(1)", "Pipe(10, upper)", "Pipe(11, lower)"]
        );
        Ok(())
    }

    #[test]
    fn should_only_anchor_on_slot_consuming_ops() -> anyhow::Result<()> {
        let mut job = compat_job();
        // A variable sharing the anchor's xref does not consume a slot and is skipped.
        job.root
            .create
            .push(Box::new(ir::VariableOp::new(xref(1), var("ctx"))));
        job.root.create.push(element(1));
        job.root.update.push(property(1, pipe(10, "upper", vec![var("a")])));

        create_pipes(&mut job)?;

        assert_eq!(
            create_summary(&job.root.create),
            vec!["Variable(1)", "ElementStart(1)", "Pipe(10, upper)"]
        );
        Ok(())
    }

    #[test]
    fn should_create_inner_pipes_of_a_chain_first() -> anyhow::Result<()> {
        for mut job in [normal_job(), compat_job()] {
            job.root.create.push(element(1));
            // value | p1 | p2
            let chain = pipe(11, "p2", vec![pipe(10, "p1", vec![var("value")])]);
            job.root.update.push(property(1, chain));

            create_pipes(&mut job)?;

            assert_eq!(
                create_summary(&job.root.create),
                vec!["ElementStart(1)", "Pipe(10, p1)", "Pipe(11, p2)"]
            );
        }
        Ok(())
    }

    #[test]
    fn should_create_pipes_for_every_slot_dependent_update_op() -> anyhow::Result<()> {
        let mut job = compat_job();
        job.root.create.push_all([template(1), template(2), element(3)]);
        job.root.update.push(Box::new(ir::ConditionalOp::new(
            xref(1),
            Some(pipe(10, "async", vec![var("cond$")])),
            vec![],
        )));
        job.root.update.push(Box::new(ir::RepeaterOp::new(
            xref(2),
            ir::SlotHandle::new(),
            pipe(11, "keyvalue", vec![var("items")]),
        )));
        job.root.update.push(Box::new(ir::AttributeOp::new(
            xref(3),
            "title",
            ir::BindingExpression::Expression(pipe(12, "translate", vec![var("key")])),
        )));

        create_pipes(&mut job)?;

        assert_eq!(
            create_summary(&job.root.create),
            vec![
                "Template(1)",
                "Pipe(10, async)",
                "Template(2)",
                "Pipe(11, keyvalue)",
                "ElementStart(3)",
                "Pipe(12, translate)",
            ]
        );
        Ok(())
    }

    #[test]
    fn should_accept_variadic_pipe_bindings() -> anyhow::Result<()> {
        let mut job = normal_job();
        job.root.create.push(element(1));
        let variadic = o::Expression::PipeBindingVariadic(ir::PipeBindingVariadicExpr::new(
            xref(10),
            ir::SlotHandle::new(),
            "many".to_string(),
            o::literal_arr(vec![var("a"), var("b"), var("c"), var("d"), var("e")]),
            5,
        ));
        job.root.update.push(property(1, variadic));

        create_pipes(&mut job)?;

        assert_eq!(
            create_summary(&job.root.create),
            vec!["ElementStart(1)", "Pipe(10, many)"]
        );
        Ok(())
    }

    #[test]
    fn should_process_embedded_views_independently() -> anyhow::Result<()> {
        let mut job = compat_job();
        let root_xref = job.root.xref;
        let child = job.allocate_view(Some(root_xref));
        job.root.create.push(element(1));
        job.root.update.push(property(1, pipe(20, "upper", vec![var("a")])));

        let view = job.views.get_mut(&child).expect("view was allocated");
        view.create.push_all([element(2), element_end(2)]);
        view.update.push(property(2, pipe(21, "lower", vec![var("b")])));

        create_pipes(&mut job)?;

        assert_eq!(
            create_summary(&job.root.create),
            vec!["ElementStart(1)", "Pipe(20, upper)"]
        );
        assert_eq!(
            create_summary(&job.views[&child].create),
            vec!["ElementStart(2)", "Pipe(21, lower)", "ElementEnd(2)"]
        );
        Ok(())
    }

    #[test]
    fn should_create_pipes_in_host_bindings() -> anyhow::Result<()> {
        let mut job = HostBindingCompilationJob::new("TestCmp", CompatibilityMode::Normal);
        let host = job.root.xref;
        job.root.update.push(Box::new(ir::PropertyOp::new(
            host,
            "title",
            ir::BindingExpression::Expression(pipe(1, "upper", vec![var("title")])),
        )));

        create_pipes(&mut job)?;

        assert_eq!(create_summary(&job.root.create), vec!["Pipe(1, upper)"]);
        Ok(())
    }

    #[test]
    fn should_reject_pipes_in_child_operations_without_mutating() {
        let mut job = normal_job();
        let root_xref = job.root.xref;
        let child = job.allocate_view(Some(root_xref));
        job.root.create.push(element(1));
        job.root.update.push(property(1, pipe(10, "valid", vec![var("a")])));

        let pure = o::Expression::PureFunction(ir::PureFunctionExpr::new(
            Some(Box::new(pipe(11, "hidden", vec![var("b")]))),
            vec![],
        ));
        let view = job.views.get_mut(&child).expect("view was allocated");
        view.create.push(element(2));
        view.update.push(property(2, pure));

        let err = internal(create_pipes(&mut job).unwrap_err());

        assert_eq!(
            err,
            InternalError::PipeInChildOperation {
                name: "hidden".to_string()
            }
        );
        assert_eq!(create_summary(&job.root.create), vec!["ElementStart(1)"]);
        assert_eq!(create_summary(&job.views[&child].create), vec!["ElementStart(2)"]);
    }

    #[test]
    fn should_reject_pipes_on_ops_without_slot_context() {
        let mut job = normal_job();
        job.root.create.push(element(1));
        job.root.update.push(Box::new(ir::VariableOp::new(
            xref(5),
            pipe(10, "upper", vec![var("a")]),
        )));

        let err = internal(create_pipes(&mut job).unwrap_err());

        assert_eq!(
            err,
            InternalError::PipeOnNonSlotOperation {
                name: "upper".to_string(),
                kind: ir::OpKind::Variable,
            }
        );
        assert_eq!(create_summary(&job.root.create), vec!["ElementStart(1)"]);
    }

    #[test]
    fn should_reject_pipes_in_statements() {
        let mut job = normal_job();
        job.root.update.push(Box::new(ir::StatementOp::new(o::Statement::Expression(
            o::ExpressionStatement {
                expr: Box::new(pipe(10, "json", vec![var("a")])),
            },
        ))));

        let err = internal(create_pipes(&mut job).unwrap_err());
        assert!(matches!(
            err,
            InternalError::PipeOnNonSlotOperation {
                kind: ir::OpKind::Statement,
                ..
            }
        ));
    }

    #[test]
    fn should_fail_when_anchor_is_missing_in_compatibility_mode() {
        let mut job = compat_job();
        job.root.create.push(element(1));
        job.root.update.push(property(7, pipe(10, "upper", vec![var("a")])));

        let err = internal(create_pipes(&mut job).unwrap_err());

        assert_eq!(
            err,
            InternalError::MissingPipeAnchor {
                name: "upper".to_string(),
                target: xref(7),
            }
        );
        assert!(err.to_string().starts_with("AssertionError:"));
    }

    #[test]
    fn should_not_need_an_anchor_in_normal_mode() -> anyhow::Result<()> {
        let mut job = normal_job();
        job.root.update.push(property(7, pipe(10, "upper", vec![var("a")])));

        create_pipes(&mut job)?;

        assert_eq!(create_summary(&job.root.create), vec!["Pipe(10, upper)"]);
        Ok(())
    }

    #[test]
    fn should_follow_configured_mode() -> anyhow::Result<()> {
        let config = PipelineConfig::from_json(r#"{"compatibility":"TemplateDefinitionBuilder"}"#)?;
        let mut job = ComponentCompilationJob::from_config("TestCmp", &config);
        assert_eq!(job.compatibility(), CompatibilityMode::TemplateDefinitionBuilder);

        job.root.create.push_all([element(1), element(2)]);
        job.root.update.push(property(1, pipe(10, "upper", vec![var("a")])));

        create_pipes(&mut job)?;

        assert_eq!(
            create_summary(&job.root.create),
            vec!["ElementStart(1)", "Pipe(10, upper)", "ElementStart(2)"]
        );
        Ok(())
    }
}
