use super::ModelError;

/// The model's tokenizer.
pub trait Tokenizer {
    /// Splits text into sub-word tokens, without special tokens.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Vocabulary id of a token; unknown tokens map to [`Tokenizer::unk_id`].
    fn token_to_id(&self, token: &str) -> u32;

    fn id_to_token(&self, id: u32) -> String;

    /// Model input ids for a full sentence, special tokens included.
    fn encode(&self, text: &str) -> Vec<u32>;

    fn mask_id(&self) -> u32;

    fn unk_id(&self) -> u32;

    fn pad_id(&self) -> u32 {
        0
    }

    /// Token ids of `text` without special tokens.
    fn ids(&self, text: &str) -> Vec<u32> {
        self.tokenize(text)
            .iter()
            .map(|token| self.token_to_id(token))
            .collect()
    }
}

/// Masked language model inference.
pub trait MaskedLanguageModel {
    /// Scores for every vocabulary entry at every position of every sequence,
    /// indexed `[sequence][position][token]`.
    ///
    /// Scores may be logits or log-probabilities; the driver renormalizes
    /// after removing restricted tokens.
    fn log_probs(&self, batch: &PaddedBatch) -> Result<Vec<Vec<Vec<f32>>>, ModelError>;
}

/// Token id sequences padded to a common length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedBatch {
    pub input_ids: Vec<Vec<u32>>,
    /// 1 for real tokens, 0 for padding.
    pub attention_mask: Vec<Vec<u8>>,
}

impl PaddedBatch {
    pub fn pad(sequences: &[Vec<u32>], pad_id: u32) -> Self {
        let width = sequences.iter().map(Vec::len).max().unwrap_or(0);
        let mut input_ids = Vec::with_capacity(sequences.len());
        let mut attention_mask = Vec::with_capacity(sequences.len());
        for sequence in sequences {
            let mut ids = sequence.clone();
            ids.resize(width, pad_id);
            let mut mask = vec![1; sequence.len()];
            mask.resize(width, 0);
            input_ids.push(ids);
            attention_mask.push(mask);
        }
        Self {
            input_ids,
            attention_mask,
        }
    }

    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }

    /// Padded sequence length.
    pub fn width(&self) -> usize {
        self.input_ids.first().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_longest_sequence() {
        let batch = PaddedBatch::pad(&[vec![5, 6, 7], vec![8]], 0);
        assert_eq!(batch.input_ids, vec![vec![5, 6, 7], vec![8, 0, 0]]);
        assert_eq!(batch.attention_mask, vec![vec![1, 1, 1], vec![1, 0, 0]]);
        assert_eq!(batch.width(), 3);
    }
}
