//! Rosenblatt's perceptron and the Widrow-Hoff ADALINE, two linear binary classifiers,
//! plus dataset loading and decision-region plotting for 2-D training sets.

pub mod common_types;
pub mod data;
pub mod error;
pub mod linear;
pub mod viz;

pub use common_types::{DataPoint, Dataset, Label};
pub use error::{ClassifierError, ClassifierResult};
pub use linear::{Adaline, BinaryClassifier, Hyperparameters, Perceptron};

#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::{PyRuntimeError, PyValueError};
    use pyo3::prelude::*;

    use crate::common_types::Label;
    use crate::error::ClassifierError;
    use crate::linear::{Adaline, Perceptron};

    // --- Conversion helpers ---

    fn to_py_err(err: ClassifierError) -> PyErr {
        match err {
            ClassifierError::UninitializedModel { .. } => PyRuntimeError::new_err(err.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }

    /// Labels arrive from Python as plain integers (-1 / 1).
    fn labels_from_py(labels: Vec<i64>) -> PyResult<Vec<Label>> {
        labels
            .into_iter()
            .map(Label::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_py_err)
    }

    fn labels_to_py(labels: Vec<Label>) -> Vec<i8> {
        labels.into_iter().map(Label::as_i8).collect()
    }

    #[pyclass(name = "Perceptron")]
    struct PyPerceptron {
        classifier: Perceptron<f64>,
    }

    #[pymethods]
    impl PyPerceptron {
        #[new]
        #[pyo3(signature = (eta = 0.01, epochs = 10))]
        fn new(eta: f64, epochs: usize) -> PyResult<Self> {
            Ok(PyPerceptron {
                classifier: Perceptron::new(eta, epochs).map_err(to_py_err)?,
            })
        }

        /// Trains on a list of feature rows and a list of -1/1 labels; returns self.
        fn fit(mut slf: PyRefMut<'_, Self>, features: Vec<Vec<f64>>, labels: Vec<i64>) -> PyResult<PyRefMut<'_, Self>> {
            let labels = labels_from_py(labels)?;
            slf.classifier.fit(&features, &labels).map_err(to_py_err)?;
            Ok(slf)
        }

        fn predict(&self, features: Vec<Vec<f64>>) -> PyResult<Vec<i8>> {
            self.classifier.predict(&features).map(labels_to_py).map_err(to_py_err)
        }

        fn net_input(&self, sample: Vec<f64>) -> PyResult<f64> {
            self.classifier.net_input(&sample).map_err(to_py_err)
        }

        #[getter]
        fn weights(&self) -> PyResult<Vec<f64>> {
            self.classifier.weights().map(<[f64]>::to_vec).map_err(to_py_err)
        }

        #[getter]
        fn errors(&self) -> PyResult<Vec<usize>> {
            self.classifier.errors().map(<[usize]>::to_vec).map_err(to_py_err)
        }
    }

    #[pyclass(name = "Adaline")]
    struct PyAdaline {
        classifier: Adaline<f64>,
    }

    #[pymethods]
    impl PyAdaline {
        #[new]
        #[pyo3(signature = (eta = 0.01, epochs = 10))]
        fn new(eta: f64, epochs: usize) -> PyResult<Self> {
            Ok(PyAdaline {
                classifier: Adaline::new(eta, epochs).map_err(to_py_err)?,
            })
        }

        fn fit(mut slf: PyRefMut<'_, Self>, features: Vec<Vec<f64>>, labels: Vec<i64>) -> PyResult<PyRefMut<'_, Self>> {
            let labels = labels_from_py(labels)?;
            slf.classifier.fit(&features, &labels).map_err(to_py_err)?;
            Ok(slf)
        }

        fn activation(&self, features: Vec<Vec<f64>>) -> PyResult<Vec<f64>> {
            self.classifier.activation(&features).map_err(to_py_err)
        }

        fn predict(&self, features: Vec<Vec<f64>>) -> PyResult<Vec<i8>> {
            self.classifier.predict(&features).map(labels_to_py).map_err(to_py_err)
        }

        fn net_input(&self, sample: Vec<f64>) -> PyResult<f64> {
            self.classifier.net_input(&sample).map_err(to_py_err)
        }

        #[getter]
        fn weights(&self) -> PyResult<Vec<f64>> {
            self.classifier.weights().map(<[f64]>::to_vec).map_err(to_py_err)
        }

        #[getter]
        fn cost(&self) -> PyResult<Vec<f64>> {
            self.classifier.cost().map(<[f64]>::to_vec).map_err(to_py_err)
        }
    }

    /// A Python module implemented in Rust. The name of this function must match
    /// the `lib.name` in `Cargo.toml`.
    #[pymodule]
    fn linear_classifiers(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<PyPerceptron>()?;
        m.add_class::<PyAdaline>()?;
        Ok(())
    }
}
