use color_eyre::eyre;
use helm_schema_docs::{
    ChartDocs, ChartMetadata, DocumentedValue, Error, ValuesDocSource, load_chart_documentation,
};
use indoc::indoc;
use test_util::prelude::*;
use vfs::VfsPath;

#[test]
fn loads_values_documentation_from_memory_chart() -> eyre::Result<()> {
    test_util::builder().build();
    let root = VfsPath::new(vfs::MemoryFS::new());

    write(
        &root.join("Chart.yaml")?,
        indoc! {r#"
            apiVersion: v2
            name: demo
            version: 0.1.0
            appVersion: "2.0"
        "#},
    )?;
    write(
        &root.join("values.yaml")?,
        indoc! {r#"
            image:
              # -- image tag to use
              tag: latest
        "#},
    )?;

    let docs = load_chart_documentation(&root)?;
    assert_that!(
        &docs.chart,
        matches_pattern!(ChartMetadata {
            name: some(eq("demo")),
            version: some(eq("0.1.0")),
            app_version: some(eq("2.0")),
            description: none(),
        })
    );
    sim_assert_eq!(
        docs.values,
        vec![DocumentedValue::new(
            "image.tag",
            "`\"latest\"`",
            "image tag to use"
        )]
    );
    Ok(())
}

#[test]
fn chart_without_values_yaml_has_no_values() -> eyre::Result<()> {
    let root = VfsPath::new(vfs::MemoryFS::new());
    write(&root.join("Chart.yaml")?, "name: empty\nversion: 0.0.1\n")?;

    let values = ChartDocs::new(root).documented_values()?;
    assert_that!(&values, is_empty());
    Ok(())
}

#[test]
fn chart_template_yaml_is_accepted() -> eyre::Result<()> {
    let root = VfsPath::new(vfs::MemoryFS::new());
    write(&root.join("Chart.template.yaml")?, "name: templated\n")?;
    write(&root.join("values.yaml")?, "enabled: true\n")?;

    let docs = load_chart_documentation(&root)?;
    sim_assert_eq!(docs.chart.name.as_deref(), Some("templated"));
    sim_assert_eq!(docs.values, vec![DocumentedValue::new("enabled", "`true`", "")]);
    Ok(())
}

#[test]
fn missing_chart_yaml_is_an_error() -> eyre::Result<()> {
    let root = VfsPath::new(vfs::MemoryFS::new());
    write(&root.join("values.yaml")?, "a: 1\n")?;

    let err = load_chart_documentation(&root).expect_err("chart without Chart.yaml");
    assert!(matches!(err, Error::MissingChartYaml { .. }), "{err:?}");
    Ok(())
}

#[test]
fn malformed_values_yaml_is_an_error() -> eyre::Result<()> {
    let root = VfsPath::new(vfs::MemoryFS::new());
    write(&root.join("Chart.yaml")?, "name: broken\n")?;
    write(&root.join("values.yaml")?, "a: [1, 2\n")?;

    let err = load_chart_documentation(&root).expect_err("malformed values.yaml");
    assert!(matches!(err, Error::Yaml(_)), "{err:?}");
    Ok(())
}

#[test]
fn documents_demo_chart() -> eyre::Result<()> {
    let docs = load_chart_documentation(&test_util::testdata_chart("demo"))?;

    sim_assert_eq!(docs.chart.name.as_deref(), Some("demo"));
    sim_assert_eq!(
        docs.values,
        vec![
            DocumentedValue::new("replicaCount", "`1`", "number of pod replicas"),
            DocumentedValue::new(
                "image.repository",
                "`\"nginx\"`",
                "container image repository"
            ),
            DocumentedValue::new("image.tag", "`\"latest\"`", "image tag to use"),
            DocumentedValue::new("image.pullPolicy", "`\"IfNotPresent\"`", "image pull policy"),
            DocumentedValue::new("imagePullSecrets", "`[]`", "image pull secrets"),
            DocumentedValue::new("service.type", "`\"ClusterIP\"`", "service type"),
            DocumentedValue::new("service.port", "`80`", "service port"),
            DocumentedValue::new("podAnnotations", "`{}`", "extra annotations for the pod"),
            DocumentedValue::new(
                "nodeSelector",
                r#"`{"kubernetes.io/os":"linux"}`"#,
                "node selector"
            ),
            DocumentedValue::new("resources", "`nil`", "resources, unset by default"),
            DocumentedValue::new("ingress.enabled", "`false`", "enable ingress"),
            DocumentedValue::new(
                "ingress.hosts",
                r#"`[{"host":"chart-example.local","paths":[]}]`"#,
                ""
            ),
        ]
    );
    Ok(())
}
