use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;
use std::sync::Arc;

fn load_backbone(vb: &VarBuilder, config: &Config) -> Result<BertModel> {
    if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("bert"), config)
    } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("roberta"), config)
    } else {
        BertModel::load(vb.clone(), config)
    }
}

fn load_parts<'a>(model_dir: &Path, device: &Device) -> Result<(Config, VarBuilder<'a>)> {
    let config_content = std::fs::read_to_string(model_dir.join("config.json"))?;
    let config: Config = serde_json::from_str(&config_content)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

    let weights_path = model_dir.join("model.safetensors");
    let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

    Ok((config, vb))
}

/// Reads the `id2label` table of a fine-tuned model, ordered by class index.
pub fn read_labels<P: AsRef<Path>>(model_dir: P) -> Result<Vec<String>> {
    let config_content = std::fs::read_to_string(model_dir.as_ref().join("config.json"))?;
    let raw: serde_json::Value = serde_json::from_str(&config_content)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

    let Some(table) = raw.get("id2label").and_then(|v| v.as_object()) else {
        return Err(candle::Error::Msg("config.json has no id2label table".into()));
    };

    let mut labels: Vec<(usize, String)> = table
        .iter()
        .map(|(idx, label)| {
            let idx = idx
                .parse::<usize>()
                .map_err(|e| candle::Error::Msg(format!("bad id2label index {idx}: {e}")))?;
            let label = label.as_str().unwrap_or_default().to_string();
            Ok((idx, label))
        })
        .collect::<Result<_>>()?;

    labels.sort_by_key(|(idx, _)| *idx);
    Ok(labels.into_iter().map(|(_, label)| label).collect())
}

/// Plain BERT encoder; returns the last hidden state.
#[derive(Clone)]
pub struct BertEncoder(Arc<BertModel>);

impl BertEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let (config, vb) = load_parts(model_dir.as_ref(), device)?;
        Ok(Self(Arc::new(load_backbone(&vb, &config)?)))
    }

    /// `[batch, seq, hidden]`
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.0.forward(input_ids, token_type_ids, attention_mask)
    }
}

struct ClassificationHead {
    bert: BertModel,
    classifier: Linear,
}

impl ClassificationHead {
    fn load(model_dir: &Path, num_labels: usize, device: &Device) -> Result<Self> {
        let (config, vb) = load_parts(model_dir, device)?;
        let bert = load_backbone(&vb, &config)?;
        let classifier = candle_nn::linear(config.hidden_size, num_labels, vb.pp("classifier"))?;
        Ok(Self { bert, classifier })
    }
}

/// BERT with a sequence-classification head on the `[CLS]` token.
#[derive(Clone)]
pub struct BertClassifier(Arc<ClassificationHead>);

impl BertClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, num_labels: usize, device: &Device) -> Result<Self> {
        Ok(Self(Arc::new(ClassificationHead::load(
            model_dir.as_ref(),
            num_labels,
            device,
        )?)))
    }

    /// `[batch, num_labels]`
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let output = self
            .0
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        let cls_token = output.i((.., 0, ..))?;
        self.0.classifier.forward(&cls_token)
    }
}

/// BERT with a per-token classification head (named entity recognition).
#[derive(Clone)]
pub struct BertTokenClassifier(Arc<ClassificationHead>);

impl BertTokenClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, num_labels: usize, device: &Device) -> Result<Self> {
        Ok(Self(Arc::new(ClassificationHead::load(
            model_dir.as_ref(),
            num_labels,
            device,
        )?)))
    }

    /// `[batch, seq, num_labels]`
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let output = self
            .0
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        self.0.classifier.forward(&output)
    }
}

/// Tokenizer output as `[1, seq]` tensors, ready for a forward pass.
pub struct ModelInput {
    pub input_ids: Tensor,
    pub type_ids: Tensor,
    pub attention_mask: Tensor,
}

impl ModelInput {
    pub fn from_encoding(encoding: &tokenizers::Encoding, device: &Device) -> Result<Self> {
        Ok(Self {
            input_ids: Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?,
            type_ids: Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?,
            attention_mask: Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?,
        })
    }
}
